//! Error types for schema document loading.

use thiserror::Error;

/// Errors raised while reading or interpreting a schema document.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("Failed to read schema file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or does not have the expected shape.
    #[error("Malformed JSON schema document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML or does not have the expected shape.
    #[error("Malformed YAML schema document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An operation object under `paths` could not be interpreted.
    #[error("Malformed operation '{method} {route}': {source}")]
    InvalidOperation {
        route: String,
        method: String,
        #[source]
        source: serde_json::Error,
    },

    /// A `$ref` that does not point into `#/definitions/`.
    #[error("Unsupported reference '{0}': only '#/definitions/<Name>' references are supported")]
    UnsupportedReference(String),
}
