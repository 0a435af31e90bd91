//! Error types for the samplemap library.

use std::path::PathBuf;
use thiserror::Error;

/// A violated invariant in the mapper configuration.
///
/// All configuration errors are fatal and surface before any record is
/// processed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The mapper document is not valid JSON (or not a JSON object).
    #[error("malformed mapper JSON: {0}")]
    ParseFailure(String),

    /// Two output columns resolve to the same name.
    #[error("duplicate output header '{0}'")]
    DuplicateHeader(String),

    /// A header entry does not follow the mapper grammar.
    #[error("header '{header}', entry '{key}': {reason}")]
    InvalidHeader {
        header: String,
        key: String,
        reason: String,
    },

    /// A sub-header declares numbered children of its own.
    #[error("sub-header '{sub}' under '{header}' nests deeper than one level")]
    NestedSubHeader { header: String, sub: String },

    /// The requested unique field matches no configured output column.
    #[error("unique field '{0}' does not match any configured output column")]
    UnknownUniqueField(String),
}

/// Main error type for samplemap operations.
#[derive(Debug, Error)]
pub enum SamplemapError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid mapper configuration.
    #[error("mapper configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The submission portal cannot be reached or holds no usable records.
    #[error("submission source unavailable: {0}")]
    SourceUnavailable(String),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for samplemap operations.
pub type Result<T> = std::result::Result<T, SamplemapError>;
