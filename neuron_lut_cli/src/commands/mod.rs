mod common_args;
pub use common_args::*;

mod generate;
pub use generate::*;

mod query;
pub use query::*;

mod inspect;
pub use inspect::*;
