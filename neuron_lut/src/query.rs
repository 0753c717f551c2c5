use serde_json::Value;

use crate::{
    codec::SerializedTable,
    error::{LutError, Result},
    tuple::InputTuple,
};

/// Look up the precomputed result for `inputs`.
///
/// The canonical key `(a, b)` is tried first, then the compact `(a,b)` form
/// that older artifacts may have been written with.
pub fn query(table: &SerializedTable, inputs: &InputTuple) -> Result<u64> {
    let primary = inputs.primary_key();
    if let Some(result) = table.get(&primary) {
        return Ok(result);
    }

    let secondary = inputs.secondary_key();
    if let Some(result) = table.get(&secondary) {
        tracing::trace!("{primary} resolved through compact key {secondary}");
        return Ok(result);
    }

    Err(LutError::NotFound {
        inputs: primary.clone(),
        primary,
        secondary,
    })
}

/// [`query`] for inputs coming from JSON, which must be an array of
/// non-negative integers.
pub fn query_value(table: &SerializedTable, inputs: &Value) -> Result<u64> {
    let mismatch = || LutError::TypeMismatch(inputs.to_string());
    let values = inputs
        .as_array()
        .filter(|values| !values.is_empty())
        .ok_or_else(mismatch)?
        .iter()
        .map(|value| value.as_u64().ok_or_else(mismatch))
        .collect::<Result<Vec<_>>>()?;
    query(table, &InputTuple::from(values))
}

/// Output of the simulated neuron for `inputs`.
///
/// Currently the raw table lookup; post-processing of the result would go
/// here.
pub fn simulate(table: &SerializedTable, inputs: &InputTuple) -> Result<u64> {
    query(table, inputs)
}
