use crate::error::SpecError;
use crate::ir::*;
use crate::load::RawDocument;
use crate::parse;
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::ParameterOrRef;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::spec::OpenApiDocument;

/// Build the IR from a loaded document.
///
/// Fails only when the document cannot be read through the OpenAPI object
/// model at all; missing sections become empty collections.
pub fn build(doc: &RawDocument) -> Result<ParsedSpec, SpecError> {
    let document = parse::from_raw(doc)?;
    Ok(build_document(document))
}

/// Build the IR from an already typed document.
pub fn build_document(document: OpenApiDocument) -> ParsedSpec {
    let resolver = RefResolver::new(&document.components);

    let endpoints = resolve_endpoints(&document, &resolver);
    let schemas = resolve_schemas(&document, &resolver);
    log::debug!(
        "built {} endpoints and {} schemas",
        endpoints.len(),
        schemas.len()
    );

    let OpenApiDocument {
        openapi,
        info,
        servers,
        components,
        tags,
        security,
        ..
    } = document;

    ParsedSpec {
        openapi,
        info,
        endpoints,
        schemas,
        servers,
        security_schemes: components.security_schemes,
        tags,
        security,
    }
}

fn resolve_schemas(
    document: &OpenApiDocument,
    resolver: &RefResolver<'_>,
) -> Vec<SchemaDescriptor> {
    document
        .components
        .schemas
        .iter()
        .map(|(name, schema_or_ref)| {
            let schema = resolver.schema(schema_or_ref).cloned().unwrap_or_else(|| {
                log::warn!("schema {name} does not resolve to a schema body");
                Default::default()
            });
            SchemaDescriptor {
                name: name.clone(),
                description: schema.description.clone(),
                schema,
            }
        })
        .collect()
}

fn resolve_endpoints(
    document: &OpenApiDocument,
    resolver: &RefResolver<'_>,
) -> Vec<EndpointDescriptor> {
    let mut endpoints = Vec::new();

    for (path, path_item) in &document.paths {
        let path_params = resolve_parameters(&path_item.parameters, resolver);
        for method in HttpMethod::ALL {
            if let Some(op) = operation_for(path_item, method) {
                endpoints.push(build_endpoint(method, path, op, &path_params, resolver));
            }
        }
    }

    endpoints
}

fn operation_for(item: &PathItem, method: HttpMethod) -> Option<&Operation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
        HttpMethod::Options => item.options.as_ref(),
    }
}

fn build_endpoint(
    method: HttpMethod,
    path: &str,
    op: &Operation,
    path_params: &[ParameterOrRef],
    resolver: &RefResolver<'_>,
) -> EndpointDescriptor {
    // Duplicates across the two levels are kept; the document order decides.
    let mut parameters = path_params.to_vec();
    parameters.extend(resolve_parameters(&op.parameters, resolver));

    EndpointDescriptor {
        path: path.to_string(),
        method,
        operation_id: op.operation_id.clone().unwrap_or_default(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        parameters,
        request_body: op.request_body.clone(),
        responses: op.responses.clone(),
        tags: op.tags.clone(),
        security: op.security.clone(),
        deprecated: op.deprecated,
    }
}

fn resolve_parameters(
    params: &[ParameterOrRef],
    resolver: &RefResolver<'_>,
) -> Vec<ParameterOrRef> {
    params.iter().map(|p| resolver.parameter(p)).collect()
}
