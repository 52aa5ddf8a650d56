use std::path::Path;

use log::info;

use crate::error::SpecError;
use crate::ir::ParsedSpec;
use crate::load;
use crate::transform;
use crate::validate::{StructuralValidator, Validator};

/// Loads, validates and builds an OpenAPI document into a [`ParsedSpec`].
#[derive(Debug, Clone, Default)]
pub struct SpecParser<V = StructuralValidator> {
    validator: V,
}

impl SpecParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: Validator> SpecParser<V> {
    /// Use a custom validator in place of the structural one.
    pub fn with_validator(validator: V) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Check the document at `path` without building anything.
    pub fn validate_only(&self, path: &Path) -> Result<(), SpecError> {
        self.validator
            .validate(path)
            .map_err(SpecError::InvalidSpecification)
    }

    /// Load, validate, then build the IR.
    ///
    /// The extension is checked and the file parsed before the validator
    /// runs, so format and syntax errors never reach it.
    pub fn parse(&self, path: &Path) -> Result<ParsedSpec, SpecError> {
        let raw = load::load(path)?;
        self.validate_only(path)?;
        let spec = transform::build(&raw)?;
        info!(
            "parsed {}: {} endpoints, {} schemas",
            path.display(),
            spec.endpoints.len(),
            spec.schemas.len()
        );
        Ok(spec)
    }
}
