use thiserror::Error;

/// Errors raised while building, encoding or querying a lookup table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LutError {
    /// A table dimension is not a positive integer.
    #[error("{name} must be a positive integer, got {value}")]
    InvalidArgument { name: &'static str, value: String },
    /// The operation identifier is not one of the supported operations.
    #[error(
        "unsupported operation: {0} (supported: {})",
        crate::ops::Operation::names()
    )]
    UnsupportedOperation(String),
    /// A lookup was given something that is not tuple-shaped.
    #[error("input values must be a tuple of non-negative integers, got {0}")]
    TypeMismatch(String),
    /// The tuple is absent under both key renderings.
    #[error(
        "input combination {inputs} (searched as '{primary}' and '{secondary}') not found in the table"
    )]
    NotFound {
        inputs: String,
        primary: String,
        secondary: String,
    },
    /// The tuple space does not fit in memory addressing.
    #[error("table with {num_inputs} inputs of {input_bit_depth} bits has too many entries")]
    TableTooLarge {
        num_inputs: usize,
        input_bit_depth: u32,
    },
    /// A serialized entry cannot be mapped back to a tuple.
    #[error("malformed table entry '{key}': {reason}")]
    MalformedEntry { key: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = LutError> = std::result::Result<T, E>;
