//! Error types for mccmd

use thiserror::Error;

/// Result type for mccmd operations
pub type Result<T> = std::result::Result<T, MccmdError>;

/// mccmd error types
#[derive(Error, Debug)]
pub enum MccmdError {
    #[error("Unknown parameter type: {0}")]
    UnknownParamType(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid position {line}:{character}: {message}")]
    InvalidPosition {
        line: u32,
        character: u32,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
