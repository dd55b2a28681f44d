//! Error types for the DTO generator.

use thiserror::Error;

/// Errors that can occur while loading, transforming or writing declarations.
#[derive(Debug, Error)]
pub enum DtoGenError {
    /// The spec could not be fetched over HTTP
    #[error("Failed to fetch spec from '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The spec server answered with a non-success status
    #[error("Fetching spec from '{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The spec could not be read from disk
    #[error("Failed to read spec file '{path}': {source}")]
    ReadSpec {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The spec text is not valid YAML/JSON or has an unexpected shape
    #[error("Failed to decode spec: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// The document has no top-level `definitions` mapping
    #[error("Spec document has no `definitions` mapping")]
    MissingDefinitions,

    /// Two definitions canonicalize to the same type name.
    ///
    /// Both would be written to the same file, so the run is rejected.
    #[error("Definitions '{first}' and '{second}' both map to type name '{type_name}'")]
    DuplicateTypeName {
        type_name: String,
        first: String,
        second: String,
    },

    /// The type emitter could not render a definition
    #[error("Failed to emit type '{type_name}': {reason}")]
    Emit { type_name: String, reason: String },

    /// Output directory could not be created
    #[error("Failed to create output directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = DtoGenError> = std::result::Result<T, E>;
