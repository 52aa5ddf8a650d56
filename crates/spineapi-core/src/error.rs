use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to load specification file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("invalid OpenAPI specification: {0}")]
    InvalidSpecification(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("failed to spawn enhancer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("enhancer i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("enhancer exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("enhancer produced non-UTF-8 output")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    #[error("enhancer is misconfigured: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generator `{generator}` failed: {message}")]
    Generator { generator: String, message: String },
}
