use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::{LutError, Result};

/// Operations a table can precompute.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Multiply, // product of all inputs
}

impl Operation {
    /// Parse an operation identifier such as `"multiply"`.
    pub fn parse(identifier: &str) -> Result<Self> {
        Self::from_str(identifier)
            .map_err(|_| LutError::UnsupportedOperation(identifier.to_string()))
    }

    /// Comma-separated identifiers of every supported operation.
    pub fn names() -> String {
        Self::iter().join(", ")
    }

    /// Evaluate the operation on one input combination.
    ///
    /// Callers keep the tuple space within `usize`, so the product of
    /// in-range inputs cannot overflow.
    pub fn apply(self, inputs: &[u64]) -> u64 {
        match self {
            Operation::Multiply => inputs.iter().product(),
        }
    }
}
