pub mod name_normalizer;
pub mod spec_to_ir;
pub mod type_mapper;

pub use spec_to_ir::{build, build_document};
