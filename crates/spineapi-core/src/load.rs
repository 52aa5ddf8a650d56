//! Reading an OpenAPI document from disk into an untyped, order-preserving tree.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{LoadError, SpecError};

/// Serialization format of a document, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick a format from the path's extension. Matching ignores case.
    pub fn from_path(path: &Path) -> Result<Self, SpecError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(DocumentFormat::Yaml),
            Some("json") => Ok(DocumentFormat::Json),
            Some(other) => Err(SpecError::UnsupportedFormat(format!(".{other}"))),
            None => Err(SpecError::UnsupportedFormat("(no extension)".to_string())),
        }
    }
}

/// A loaded document that has not been validated or interpreted yet.
///
/// Mapping keys keep their document order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    root: Value,
}

impl RawDocument {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Resolve a local JSON pointer such as `/components/schemas/Item`.
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.root.pointer(pointer)
    }
}

/// Parse document text in the given format.
pub fn from_str(input: &str, format: DocumentFormat) -> Result<RawDocument, LoadError> {
    let root: Value = match format {
        DocumentFormat::Yaml => serde_yaml_ng::from_str(input)?,
        DocumentFormat::Json => serde_json::from_str(input)?,
    };
    Ok(RawDocument::new(root))
}

/// Read and deserialize the document at `path`.
pub fn load(path: &Path) -> Result<RawDocument, SpecError> {
    let format = DocumentFormat::from_path(path)?;
    let wrap = |source: LoadError| SpecError::Load {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    let doc = from_str(&content, format).map_err(wrap)?;
    log::debug!("loaded {} as {:?}", path.display(), format);
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("api.yaml")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("api.YML")).unwrap(),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("api.json")).unwrap(),
            DocumentFormat::Json
        );
    }

    #[test]
    fn test_unsupported_extension_is_named() {
        let err = DocumentFormat::from_path(Path::new("api.toml")).unwrap_err();
        match err {
            SpecError::UnsupportedFormat(ext) => assert_eq!(ext, ".toml"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
        assert!(matches!(
            DocumentFormat::from_path(Path::new("openapi")),
            Err(SpecError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_yaml_keeps_key_order() {
        let doc = from_str("b: 1\na: 2\nc: 3\n", DocumentFormat::Yaml).unwrap();
        let keys: Vec<&String> = doc.root().as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn test_malformed_json_is_load_error() {
        let err = from_str("{\"openapi\": ", DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
