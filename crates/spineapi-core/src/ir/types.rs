use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::grouping::{TagGroup, group_by_tag};
use super::operations::EndpointDescriptor;
use super::schemas::SchemaDescriptor;
use crate::parse::security::{SecurityRequirement, SecurityScheme};
use crate::parse::spec::{Server, Tag};
use crate::transform::name_normalizer::project_name;

pub const DEFAULT_TITLE: &str = "Generated API";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// The normalized, generator-ready view of an OpenAPI document.
///
/// Built once per parse and never mutated afterwards; emitters read the
/// collections directly or through the accessors below.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSpec {
    /// Declared `openapi` version string, if any.
    pub openapi: Option<String>,
    pub info: IndexMap<String, Value>,
    pub endpoints: Vec<EndpointDescriptor>,
    pub schemas: Vec<SchemaDescriptor>,
    pub servers: Vec<Server>,
    pub security_schemes: IndexMap<String, SecurityScheme>,
    pub tags: Vec<Tag>,
    /// Document-level security requirements.
    pub security: Vec<SecurityRequirement>,
}

impl ParsedSpec {
    pub fn title(&self) -> &str {
        self.info_str("title").unwrap_or(DEFAULT_TITLE)
    }

    pub fn version(&self) -> &str {
        self.info_str("version").unwrap_or(DEFAULT_VERSION)
    }

    pub fn description(&self) -> &str {
        self.info_str("description").unwrap_or("")
    }

    pub fn project_name(&self) -> String {
        project_name(self.title())
    }

    pub fn endpoints_by_tag(&self, tag: &str) -> Vec<&EndpointDescriptor> {
        self.endpoints.iter().filter(|e| e.has_tag(tag)).collect()
    }

    /// Look up a schema by raw name or by derived type name.
    pub fn schema(&self, name: &str) -> Option<&SchemaDescriptor> {
        self.schemas
            .iter()
            .find(|s| s.name == name || s.type_name() == name)
    }

    /// Look up an endpoint by its derived handler name.
    pub fn endpoint(&self, handler: &str) -> Option<&EndpointDescriptor> {
        self.endpoints.iter().find(|e| e.handler_name() == handler)
    }

    pub fn tag_groups(&self) -> Vec<TagGroup<'_>> {
        group_by_tag(self)
    }

    fn info_str(&self, key: &str) -> Option<&str> {
        self.info.get(key).and_then(Value::as_str)
    }
}
