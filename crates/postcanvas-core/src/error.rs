//! Error types.
//!
//! Interaction itself never fails: locked targets, size floors and history
//! bounds are handled as no-ops. Errors only come from parsing input that
//! crosses the crate boundary (documents, configuration, CSS colors).

use thiserror::Error;

/// Errors surfaced by parsing and validation.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for fallible editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
