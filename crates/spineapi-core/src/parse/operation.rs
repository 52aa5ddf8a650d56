use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::body::{RequestBodyOrRef, ResponseOrRef};
use super::parameter::ParameterOrRef;
use super::security::SecurityRequirement;

/// One HTTP-method entry of a path item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<ParameterOrRef>,
    pub request_body: Option<RequestBodyOrRef>,
    /// Status code (or `default`, `2XX`) → response, in document order.
    pub responses: IndexMap<String, ResponseOrRef>,
    pub deprecated: bool,
    pub security: Vec<SecurityRequirement>,
}

/// All operations under one URL template.
///
/// Keys outside the seven recognized verbs (`trace`, `servers`, `x-*`
/// extensions) are dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<ParameterOrRef>,
    pub get: Option<Operation>,
    pub post: Option<Operation>,
    pub put: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,
    pub head: Option<Operation>,
    pub options: Option<Operation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_keys_dropped() {
        let item: PathItem = serde_yaml_ng::from_str(
            r#"
x-owner: platform
trace:
  responses: {'200': {description: echo}}
get:
  operationId: ping
  x-rate-limit: 10
"#,
        )
        .unwrap();
        assert_eq!(item.get.unwrap().operation_id.as_deref(), Some("ping"));
        assert!(item.post.is_none());
    }

    #[test]
    fn test_operation_defaults() {
        let op: Operation = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(op, Operation::default());
        assert!(!op.deprecated);
    }
}
