use indexmap::IndexMap;
use serde::Serialize;

use crate::parse::body::{RequestBodyOrRef, ResponseOrRef};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::schema::SchemaOrRef;
use crate::parse::security::SecurityRequirement;
use crate::transform::name_normalizer::handler_name;

/// HTTP method of a recognized operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Every recognized verb, in the order operations are collected.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Path-item key for this verb.
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }
}

/// One operation: an HTTP method on a path template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointDescriptor {
    pub path: String,
    pub method: HttpMethod,
    /// Declared `operationId`, empty when the document has none.
    pub operation_id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Path-level parameters first, then operation-level ones.
    pub parameters: Vec<ParameterOrRef>,
    pub request_body: Option<RequestBodyOrRef>,
    pub responses: IndexMap<String, ResponseOrRef>,
    pub tags: Vec<String>,
    pub security: Vec<SecurityRequirement>,
    pub deprecated: bool,
}

impl EndpointDescriptor {
    /// Implementation identifier, e.g. the handler function name.
    pub fn handler_name(&self) -> String {
        handler_name(&self.operation_id, self.method.as_str(), &self.path)
    }

    /// Inline parameters declared in `location`, in effective order.
    pub fn parameters_in(&self, location: ParameterLocation) -> Vec<&Parameter> {
        self.parameters
            .iter()
            .filter_map(ParameterOrRef::as_parameter)
            .filter(|p| p.location == location)
            .collect()
    }

    pub fn path_params(&self) -> Vec<&Parameter> {
        self.parameters_in(ParameterLocation::Path)
    }

    pub fn query_params(&self) -> Vec<&Parameter> {
        self.parameters_in(ParameterLocation::Query)
    }

    pub fn header_params(&self) -> Vec<&Parameter> {
        self.parameters_in(ParameterLocation::Header)
    }

    pub fn cookie_params(&self) -> Vec<&Parameter> {
        self.parameters_in(ParameterLocation::Cookie)
    }

    pub fn has_request_body(&self) -> bool {
        self.request_body.is_some()
    }

    pub fn request_schema(&self) -> Option<&SchemaOrRef> {
        self.request_body.as_ref()?.json_schema()
    }

    /// JSON schema of the first 2xx response.
    ///
    /// Only the first 2xx entry is consulted; if it has no JSON body the
    /// result is `None` even when a later 2xx entry has one.
    pub fn success_response_schema(&self) -> Option<&SchemaOrRef> {
        let (_, response) = self
            .responses
            .iter()
            .find(|(status, _)| status.starts_with('2'))?;
        response.json_schema()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
