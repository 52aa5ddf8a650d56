//! Request and response bodies, and the media types inside them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::SchemaOrRef;

pub const JSON: &str = "application/json";

/// Media type name → media type object.
pub type Content = IndexMap<String, MediaType>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

fn json_schema(content: &Content) -> Option<&SchemaOrRef> {
    content.get(JSON)?.schema.as_ref()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestBodyOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    RequestBody(RequestBody),
}

impl RequestBodyOrRef {
    /// Schema of the `application/json` content, if declared inline.
    pub fn json_schema(&self) -> Option<&SchemaOrRef> {
        match self {
            RequestBodyOrRef::RequestBody(body) => json_schema(&body.content),
            RequestBodyOrRef::Ref { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(Response),
}

impl ResponseOrRef {
    /// Schema of the `application/json` content, if declared inline.
    pub fn json_schema(&self) -> Option<&SchemaOrRef> {
        match self {
            ResponseOrRef::Response(r) => json_schema(&r.content),
            ResponseOrRef::Ref { .. } => None,
        }
    }
}
