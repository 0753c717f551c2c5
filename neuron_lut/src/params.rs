use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{LutError, Result},
    ops::Operation,
};

/// Validated shape of a lookup table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTableParams")]
pub struct TableParams {
    pub num_inputs: usize,
    pub input_bit_depth: u32,
    pub operation: Operation,
}

/// Parameters as they appear in a JSON parameters file, before validation.
#[derive(Debug, Deserialize)]
struct RawTableParams {
    num_inputs: Value,
    input_bit_depth: Value,
    #[serde(default = "default_operation")]
    operation: String,
}

fn default_operation() -> String {
    Operation::Multiply.to_string()
}

impl TryFrom<RawTableParams> for TableParams {
    type Error = LutError;

    fn try_from(raw: RawTableParams) -> Result<Self> {
        let num_inputs = integer_dimension("num_inputs", &raw.num_inputs)?;
        let input_bit_depth = integer_dimension("input_bit_depth", &raw.input_bit_depth)?;
        Self::new(num_inputs, input_bit_depth, &raw.operation)
    }
}

fn integer_dimension(name: &'static str, value: &Value) -> Result<i64> {
    value.as_i64().ok_or_else(|| LutError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

fn positive<T: TryFrom<i64>>(name: &'static str, value: i64) -> Result<T> {
    let invalid = || LutError::InvalidArgument {
        name,
        value: value.to_string(),
    };
    if value <= 0 {
        return Err(invalid());
    }
    T::try_from(value).map_err(|_| invalid())
}

impl TableParams {
    /// Validate raw dimensions and an operation identifier.
    pub fn new(num_inputs: i64, input_bit_depth: i64, operation: &str) -> Result<Self> {
        Ok(Self {
            num_inputs: positive("num_inputs", num_inputs)?,
            input_bit_depth: positive("input_bit_depth", input_bit_depth)?,
            operation: Operation::parse(operation)?,
        })
    }

    /// Read `{"num_inputs": .., "input_bit_depth": .., "operation": ..}`.
    ///
    /// Dimensions that are not JSON integers are rejected with
    /// [`LutError::InvalidArgument`].
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let raw = RawTableParams::deserialize(value)?;
        Self::try_from(raw)
    }

    /// Number of values a single input can take, `2^input_bit_depth`.
    pub fn values_per_input(&self) -> Result<u64> {
        1u64.checked_shl(self.input_bit_depth)
            .ok_or_else(|| self.too_large())
    }

    /// Total entries in the table, `values_per_input ^ num_inputs`.
    pub fn entry_count(&self) -> Result<usize> {
        let per_input = usize::try_from(self.values_per_input()?).map_err(|_| self.too_large())?;
        let exponent = u32::try_from(self.num_inputs).map_err(|_| self.too_large())?;
        per_input
            .checked_pow(exponent)
            .ok_or_else(|| self.too_large())
    }

    /// Fail unless the table has at most `max_entries` entries.
    pub fn ensure_within(&self, max_entries: usize) -> Result<usize> {
        let count = self.entry_count()?;
        if count > max_entries {
            return Err(self.too_large());
        }
        Ok(count)
    }

    fn too_large(&self) -> LutError {
        LutError::TableTooLarge {
            num_inputs: self.num_inputs,
            input_bit_depth: self.input_bit_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_invalid(result: Result<TableParams>, expected: &str) {
        match result {
            Err(LutError::InvalidArgument { name, .. }) => assert_eq!(name, expected),
            other => panic!("expected InvalidArgument for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn test_new_valid() {
        let params = TableParams::new(2, 3, "multiply").unwrap();
        assert_eq!(params.num_inputs, 2);
        assert_eq!(params.input_bit_depth, 3);
        assert_eq!(params.operation, Operation::Multiply);
        assert_eq!(params.values_per_input().unwrap(), 8);
        assert_eq!(params.entry_count().unwrap(), 64);
    }

    #[test]
    fn test_new_rejects_non_positive() {
        assert_invalid(TableParams::new(0, 1, "multiply"), "num_inputs");
        assert_invalid(TableParams::new(-1, 1, "multiply"), "num_inputs");
        assert_invalid(TableParams::new(2, 0, "multiply"), "input_bit_depth");
        assert_invalid(TableParams::new(2, -3, "multiply"), "input_bit_depth");
        assert_invalid(TableParams::new(2, i64::MAX, "multiply"), "input_bit_depth");
    }

    #[test]
    fn test_new_rejects_unknown_operation() {
        assert!(matches!(
            TableParams::new(2, 1, "add"),
            Err(LutError::UnsupportedOperation(op)) if op == "add"
        ));
    }

    #[test]
    fn test_from_json() {
        let params =
            TableParams::from_json_value(&json!({"num_inputs": 3, "input_bit_depth": 1}))
                .unwrap();
        assert_eq!(params, TableParams::new(3, 1, "multiply").unwrap());

        let params: TableParams = serde_json::from_value(
            json!({"num_inputs": 1, "input_bit_depth": 4, "operation": "multiply"}),
        )
        .unwrap();
        assert_eq!(params.entry_count().unwrap(), 16);
    }

    #[test]
    fn test_from_json_rejects_non_integers() {
        assert_invalid(
            TableParams::from_json_value(&json!({"num_inputs": 1.5, "input_bit_depth": 1})),
            "num_inputs",
        );
        assert_invalid(
            TableParams::from_json_value(&json!({"num_inputs": "2", "input_bit_depth": 1})),
            "num_inputs",
        );
        assert_invalid(
            TableParams::from_json_value(&json!({"num_inputs": 2, "input_bit_depth": true})),
            "input_bit_depth",
        );
        assert_invalid(
            TableParams::from_json_value(&json!({"num_inputs": 2, "input_bit_depth": 2.0})),
            "input_bit_depth",
        );
    }

    #[test]
    fn test_from_json_missing_field() {
        assert!(matches!(
            TableParams::from_json_value(&json!({"num_inputs": 2})),
            Err(LutError::Json(_))
        ));
    }

    #[test]
    fn test_size_guard() {
        let huge = TableParams::new(2, 64, "multiply").unwrap();
        assert!(matches!(huge.entry_count(), Err(LutError::TableTooLarge { .. })));

        let wide = TableParams::new(100, 8, "multiply").unwrap();
        assert!(matches!(wide.entry_count(), Err(LutError::TableTooLarge { .. })));

        let small = TableParams::new(2, 4, "multiply").unwrap();
        assert_eq!(small.ensure_within(256).unwrap(), 256);
        assert!(matches!(small.ensure_within(255), Err(LutError::TableTooLarge { .. })));
    }
}
