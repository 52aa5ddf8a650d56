use std::collections::HashSet;

use super::parameter::ParameterOrRef;
use super::schema::{Schema, SchemaOrRef};
use super::spec::Components;

const PARAMETERS_PREFIX: &str = "#/components/parameters/";
const SCHEMAS_PREFIX: &str = "#/components/schemas/";

/// Follows local `#/components/...` references.
///
/// Only the component kinds the IR inlines are supported. Anything else,
/// including external references, is reported as unresolved.
pub struct RefResolver<'a> {
    components: &'a Components,
}

impl<'a> RefResolver<'a> {
    pub fn new(components: &'a Components) -> Self {
        Self { components }
    }

    /// Inline a parameter reference. Unresolvable references come back
    /// unchanged.
    pub fn parameter(&self, param: &ParameterOrRef) -> ParameterOrRef {
        let mut visited = HashSet::new();
        let mut current = param;

        while let ParameterOrRef::Ref { ref_path } = current {
            if !visited.insert(ref_path.as_str()) {
                log::warn!("circular parameter reference: {ref_path}");
                return param.clone();
            }
            match component_name(ref_path, PARAMETERS_PREFIX)
                .and_then(|name| self.components.parameters.get(name.as_ref()))
            {
                Some(target) => current = target,
                None => {
                    log::warn!("unresolved parameter reference: {ref_path}");
                    return param.clone();
                }
            }
        }

        current.clone()
    }

    /// The schema body behind a schema or a chain of schema references.
    /// Boolean schemas have no body.
    pub fn schema(&self, schema: &'a SchemaOrRef) -> Option<&'a Schema> {
        let mut visited = HashSet::new();
        let mut current = schema;

        loop {
            match current {
                SchemaOrRef::Schema(s) => return Some(s),
                SchemaOrRef::Bool(_) => return None,
                SchemaOrRef::Ref { ref_path } => {
                    if !visited.insert(ref_path.as_str()) {
                        log::warn!("circular schema reference: {ref_path}");
                        return None;
                    }
                    current = component_name(ref_path, SCHEMAS_PREFIX)
                        .and_then(|name| self.components.schemas.get(name.as_ref()))?;
                }
            }
        }
    }
}

/// Strip a component prefix, undoing JSON pointer escapes.
fn component_name<'r>(ref_path: &'r str, prefix: &str) -> Option<std::borrow::Cow<'r, str>> {
    let raw = ref_path.strip_prefix(prefix)?;
    if raw.contains('~') {
        Some(raw.replace("~1", "/").replace("~0", "~").into())
    } else {
        Some(raw.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parameter::ParameterLocation;

    fn components(yaml: &str) -> Components {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parameter_ref_is_inlined() {
        let c = components(
            r##"
parameters:
  Limit:
    name: limit
    in: query
  PageSize:
    $ref: '#/components/parameters/Limit'
"##,
        );
        let resolver = RefResolver::new(&c);
        let param = ParameterOrRef::Ref {
            ref_path: "#/components/parameters/PageSize".to_string(),
        };
        let resolved = resolver.parameter(&param);
        let p = resolved.as_parameter().expect("should resolve through chain");
        assert_eq!(p.name, "limit");
        assert_eq!(p.location, ParameterLocation::Query);
    }

    #[test]
    fn test_missing_parameter_ref_is_kept() {
        let c = Components::default();
        let resolver = RefResolver::new(&c);
        let param = ParameterOrRef::Ref {
            ref_path: "#/components/parameters/Nope".to_string(),
        };
        assert_eq!(resolver.parameter(&param), param);
    }

    #[test]
    fn test_circular_schema_ref() {
        let c = components(
            r##"
schemas:
  A:
    $ref: '#/components/schemas/B'
  B:
    $ref: '#/components/schemas/A'
"##,
        );
        let resolver = RefResolver::new(&c);
        assert!(resolver.schema(&c.schemas["A"]).is_none());
    }

    #[test]
    fn test_escaped_component_name() {
        assert_eq!(
            component_name("#/components/schemas/a~1b", SCHEMAS_PREFIX).as_deref(),
            Some("a/b")
        );
    }
}
