//! Starter OpenAPI document written by `spineapi init`.

use heck::ToKebabCase;

const TEMPLATE: &str = include_str!("starter.yaml");

/// File name for a new document, e.g. `pet-store.yaml` for "Pet Store".
pub fn file_name(name: &str) -> Option<String> {
    let stem = name.to_kebab_case();
    (!stem.is_empty()).then(|| format!("{stem}.yaml"))
}

/// Render the starter document for a project called `name`.
pub fn render(name: &str) -> String {
    let domain = name.to_kebab_case().replace('-', "");
    TEMPLATE
        .replace("__TITLE__", &quoted(&format!("{name} API")))
        .replace(
            "__DESCRIPTION__",
            &quoted(&format!("API specification for {name}")),
        )
        .replace("__DOMAIN__", &domain)
}

// A JSON string literal is also a valid double-quoted YAML scalar.
fn quoted(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use spineapi_core::ir::HttpMethod;
    use spineapi_core::{SpecParser, StructuralValidator, Validator};

    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("Pet Store").as_deref(), Some("pet-store.yaml"));
        assert_eq!(file_name("inventory").as_deref(), Some("inventory.yaml"));
        assert_eq!(file_name("  ").as_deref(), None);
    }

    #[test]
    fn test_rendered_document_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pet-store.yaml");
        fs::write(&path, render("Pet Store")).unwrap();

        assert_eq!(StructuralValidator.validate(&path), Ok(()));

        let spec = SpecParser::new().parse(&path).unwrap();
        assert_eq!(spec.title(), "Pet Store API");
        assert_eq!(spec.project_name(), "pet_store_api");
        assert_eq!(spec.servers[1].url, "https://api.petstore.com");
        assert_eq!(spec.endpoints.len(), 6);
        assert_eq!(spec.schemas.len(), 4);

        let delete = spec.endpoint("delete_item").unwrap();
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.path_params()[0].name, "item_id");
    }

    #[test]
    fn test_name_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acme.yaml");
        fs::write(&path, render("Acme: \"Labs\"")).unwrap();

        let spec = SpecParser::new().parse(&path).unwrap();
        assert_eq!(spec.title(), "Acme: \"Labs\" API");
    }
}
