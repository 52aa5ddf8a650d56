pub mod grouping;
pub mod operations;
pub mod schemas;
pub mod types;

pub use grouping::{DEFAULT_GROUP, TagGroup};
pub use operations::*;
pub use schemas::*;
pub use types::ParsedSpec;
