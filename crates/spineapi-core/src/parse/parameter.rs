use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::SchemaOrRef;

/// Where a parameter is carried (`in`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }
}

/// An inline parameter. `name` and `in` are the only required keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// A parameter list entry: a local reference or an inline parameter.
///
/// Reference entries that survive building are unresolved ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(Parameter),
}

impl ParameterOrRef {
    /// The inline parameter, if this entry is not an unresolved reference.
    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            ParameterOrRef::Parameter(p) => Some(p),
            ParameterOrRef::Ref { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let entry: ParameterOrRef = serde_yaml_ng::from_str("{name: q, in: query}").unwrap();
        let param = entry.as_parameter().unwrap();
        assert_eq!(param.location.as_str(), "query");
        assert!(!param.required);
        assert!(!param.deprecated);
        assert!(param.schema.is_none());
    }

    #[test]
    fn test_unknown_location_is_rejected() {
        let result: Result<Parameter, _> = serde_yaml_ng::from_str("{name: b, in: body}");
        assert!(result.is_err());
    }
}
