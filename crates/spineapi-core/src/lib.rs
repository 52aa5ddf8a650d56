pub mod config;
pub mod enhance;
pub mod error;
pub mod generate;
pub mod ir;
pub mod load;
pub mod parse;
pub mod parser;
pub mod transform;
pub mod validate;

pub use error::SpecError;
pub use ir::ParsedSpec;
pub use parser::SpecParser;
pub use validate::{StructuralValidator, Validator};

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a parsed spec.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        spec: &ParsedSpec,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
