use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{error::Result, params::TableParams, tuple::InputTuple};

/// Tuple-keyed table of precomputed results.
///
/// Iterates in lexicographic tuple order, the order the builder generates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrecomputedTable {
    entries: BTreeMap<InputTuple, u64>,
}

/// Dimensions recovered from a table that enumerates a full tuple space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableShape {
    pub num_inputs: usize,
    pub input_bit_depth: u32,
}

impl PrecomputedTable {
    pub(crate) fn from_entries(entries: BTreeMap<InputTuple, u64>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, inputs: &InputTuple) -> Option<u64> {
        self.entries.get(inputs).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InputTuple, u64)> + '_ {
        self.entries.iter().map(|(inputs, result)| (inputs, *result))
    }

    /// Infer `num_inputs` and `input_bit_depth`, if the keys are exactly the
    /// tuple space `[0, 2^input_bit_depth)^num_inputs`.
    pub fn shape(&self) -> Option<TableShape> {
        let num_inputs = self.entries.keys().next()?.arity();
        if self.entries.keys().any(|inputs| inputs.arity() != num_inputs) {
            return None;
        }
        let max_value = self
            .entries
            .keys()
            .flat_map(|inputs| inputs.values().iter().copied())
            .max()?;
        // smallest positive depth whose range covers max_value
        let input_bit_depth = (u64::BITS - max_value.leading_zeros()).max(1);
        let expected = 1usize
            .checked_shl(input_bit_depth)?
            .checked_pow(u32::try_from(num_inputs).ok()?)?;
        // keys are distinct and in range, so a matching count means complete
        (expected == self.len()).then_some(TableShape {
            num_inputs,
            input_bit_depth,
        })
    }
}

impl TableParams {
    /// Enumerate every input combination and precompute the operation.
    #[tracing::instrument(
        skip_all,
        name = "build_table",
        level = "trace",
        fields(profiling_1)
    )]
    pub fn build(&self) -> Result<PrecomputedTable> {
        let entry_count = self.entry_count()?;
        let values_per_input = self.values_per_input()?;
        tracing::debug!(
            num_inputs = self.num_inputs,
            input_bit_depth = self.input_bit_depth,
            operation = %self.operation,
            entry_count,
            "building table"
        );

        let entries: BTreeMap<_, _> = (0..self.num_inputs)
            .map(|_| 0..values_per_input)
            .multi_cartesian_product()
            .map(|inputs| {
                let result = self.operation.apply(&inputs);
                (InputTuple::from(inputs), result)
            })
            .collect();
        debug_assert_eq!(entries.len(), entry_count);

        Ok(PrecomputedTable::from_entries(entries))
    }
}

/// Validate raw parameters and build the table.
///
/// `build(2, 1, "multiply")` yields `{(0,0): 0, (0,1): 0, (1,0): 0, (1,1): 1}`.
pub fn build(num_inputs: i64, input_bit_depth: i64, operation: &str) -> Result<PrecomputedTable> {
    TableParams::new(num_inputs, input_bit_depth, operation)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LutError;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_build_two_by_one() {
        let table = build(2, 1, "multiply").unwrap();
        let entries = table
            .iter()
            .map(|(inputs, result)| (inputs.values().to_vec(), result))
            .collect_vec();
        assert_eq!(
            entries,
            vec![
                (vec![0, 0], 0),
                (vec![0, 1], 0),
                (vec![1, 0], 0),
                (vec![1, 1], 1)
            ]
        );
    }

    #[test]
    fn test_build_single_input() {
        let table = build(1, 3, "multiply").unwrap();
        assert_eq!(table.len(), 8);
        for value in 0..8 {
            assert_eq!(table.get(&InputTuple::from([value])), Some(value));
        }
    }

    #[test]
    fn test_build_rejects_bad_arguments() {
        for (num_inputs, input_bit_depth) in [(0, 1), (-1, 1), (2, 0), (2, -1)] {
            assert!(
                matches!(
                    build(num_inputs, input_bit_depth, "multiply"),
                    Err(LutError::InvalidArgument { .. })
                ),
                "({num_inputs}, {input_bit_depth})"
            );
        }
    }

    #[test]
    fn test_build_rejects_add() {
        assert!(matches!(
            build(2, 1, "add"),
            Err(LutError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_build_too_large() {
        assert!(matches!(
            build(8, 63, "multiply"),
            Err(LutError::TableTooLarge { .. })
        ));
    }

    #[test]
    fn test_shape() {
        let table = build(3, 2, "multiply").unwrap();
        assert_eq!(
            table.shape(),
            Some(TableShape {
                num_inputs: 3,
                input_bit_depth: 2
            })
        );
        assert_eq!(PrecomputedTable::default().shape(), None);

        let partial = PrecomputedTable::from_entries(
            [(InputTuple::from([0, 1]), 0), (InputTuple::from([1, 1]), 1)]
                .into_iter()
                .collect(),
        );
        assert_eq!(partial.shape(), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_build_enumerates_tuple_space(num_inputs in 1i64..=4, input_bit_depth in 1i64..=3) {
            let table = build(num_inputs, input_bit_depth, "multiply").unwrap();
            let per_input = 1u64 << input_bit_depth;
            prop_assert_eq!(table.len(), per_input.pow(num_inputs as u32) as usize);

            let distinct: HashSet<_> = table.iter().map(|(inputs, _)| inputs.clone()).collect();
            prop_assert_eq!(distinct.len(), table.len());

            for (inputs, result) in table.iter() {
                prop_assert_eq!(inputs.arity(), num_inputs as usize);
                prop_assert!(inputs.values().iter().all(|v| *v < per_input));
                prop_assert_eq!(result, inputs.values().iter().product::<u64>());
                if inputs.values().contains(&0) {
                    prop_assert_eq!(result, 0);
                }
            }
        }
    }
}
