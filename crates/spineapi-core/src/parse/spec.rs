use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operation::PathItem;
use super::parameter::ParameterOrRef;
use super::schema::SchemaOrRef;
use super::security::{SecurityRequirement, SecurityScheme};

/// Top-level OpenAPI 3.x document.
///
/// `info` stays an open mapping: only `title`, `version` and `description`
/// are interpreted, and those are read with defaults by the IR.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenApiDocument {
    pub openapi: Option<String>,
    pub info: IndexMap<String, Value>,
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
    pub tags: Vec<Tag>,
    pub security: Vec<SecurityRequirement>,
}

impl OpenApiDocument {
    pub fn deserialize_from(root: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(root)
    }
}

/// Reusable definitions the IR reads. Other component kinds are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Components {
    pub schemas: IndexMap<String, SchemaOrRef>,
    pub parameters: IndexMap<String, ParameterOrRef>,
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

/// A server entry, passed through to emitters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URL template variables, kept as written.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
