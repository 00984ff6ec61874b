//! Error types for the gapscope library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gapscope operations.
///
/// Only load failures and invalid configuration surface here. Malformed rows,
/// unparsable metrics and lookup misses degrade to absent values instead.
#[derive(Debug, Error)]
pub enum GapscopeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two rows share the same (entity, period) key.
    #[error("Duplicate row for entity '{entity}' in period {period}")]
    DuplicateKey { entity: String, period: i32 },

    /// A load finished after a newer load had been started.
    #[error("Load #{sequence} was superseded by a newer load")]
    Superseded { sequence: u64 },

    /// The load could not be completed for a reason other than IO.
    #[error("Load failed: {0}")]
    Load(String),
}

/// Result type alias for gapscope operations.
pub type Result<T> = std::result::Result<T, GapscopeError>;
