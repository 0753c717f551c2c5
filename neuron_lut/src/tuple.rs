use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{LutError, Result};

/// One combination of input values, used as the table key.
///
/// Ordering is lexicographic, which matches the order the builder
/// enumerates tuples in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputTuple(Box<[u64]>);

impl InputTuple {
    pub fn new(values: impl Into<Box<[u64]>>) -> Self {
        Self(values.into())
    }

    pub fn values(&self) -> &[u64] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// The canonical key, e.g. `(0, 1)` or `(5,)`.
    pub fn primary_key(&self) -> String {
        self.to_string()
    }

    /// The canonical key with all spaces removed, e.g. `(0,1)`.
    pub fn secondary_key(&self) -> String {
        self.primary_key().replace(' ', "")
    }
}

impl From<Vec<u64>> for InputTuple {
    fn from(values: Vec<u64>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[u64; N]> for InputTuple {
    fn from(values: [u64; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl fmt::Display for InputTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.values() {
            // single element keeps a trailing comma so it never reads as a scalar
            [single] => write!(f, "({single},)"),
            values => write!(f, "({})", values.iter().join(", ")),
        }
    }
}

/// Accepts `(1, 2)`, `(1,2)`, `1,2`, `(3,)` and `3`.
impl FromStr for InputTuple {
    type Err = LutError;

    fn from_str(s: &str) -> Result<Self> {
        let mismatch = || LutError::TypeMismatch(format!("{s:?}"));

        let trimmed = s.trim();
        let inner = match trimmed.strip_prefix('(') {
            Some(rest) => rest.strip_suffix(')').ok_or_else(mismatch)?,
            None if trimmed.ends_with(')') => return Err(mismatch()),
            None => trimmed,
        };
        let inner = inner.trim();
        let inner = inner.strip_suffix(',').unwrap_or(inner);
        if inner.trim().is_empty() {
            return Err(mismatch());
        }

        inner
            .split(',')
            .map(|part| part.trim().parse::<u64>().map_err(|_| mismatch()))
            .collect::<Result<Vec<_>>>()
            .map(Self::from)
    }
}
