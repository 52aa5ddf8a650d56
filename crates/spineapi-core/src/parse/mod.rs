//! Typed view of the OpenAPI 3.x object model.
//!
//! Every optional section carries a `#[serde(default)]`, so a sparse document
//! reads into empty collections rather than failing.

pub mod body;
pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod schema;
pub mod security;
pub mod spec;

use crate::error::SpecError;
use crate::load::RawDocument;
use spec::OpenApiDocument;

/// Read a raw document through the typed object model.
pub fn from_raw(doc: &RawDocument) -> Result<OpenApiDocument, SpecError> {
    OpenApiDocument::deserialize_from(doc.root())
        .map_err(|e| SpecError::InvalidSpecification(e.to_string()))
}
