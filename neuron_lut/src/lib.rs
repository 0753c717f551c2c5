//! Precomputed lookup tables that stand in for a single neuron.
//!
//! A table enumerates every combination of `num_inputs` values of
//! `input_bit_depth` bits each and stores the result of an [`Operation`] for
//! it. Tables are persisted as JSON objects keyed by the canonical tuple text
//! `(a, b, ...)` and queried instead of computing the operation at runtime.
//!
//! ```
//! use neuron_lut::{InputTuple, build, query, serialize};
//!
//! let table = serialize(&build(2, 2, "multiply").unwrap());
//! assert_eq!(table.len(), 16);
//! assert_eq!(query(&table, &InputTuple::from([3, 2])).unwrap(), 6);
//! ```

pub mod builder;
pub mod codec;
pub mod error;
pub mod ops;
pub mod params;
pub mod query;
pub mod tuple;

pub use builder::{PrecomputedTable, TableShape, build};
pub use codec::{SerializedTable, deserialize, serialize};
pub use error::LutError;
pub use ops::Operation;
pub use params::TableParams;
pub use query::{query, query_value, simulate};
pub use tuple::InputTuple;
