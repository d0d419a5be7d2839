//! Error types for dxf-vectorize

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reading drawings and producing records
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing the DXF group code stream
    #[error("Parse error: {0}")]
    Parse(String),

    /// Structurally invalid DXF file
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// Output record violates the structure-of-arrays contract
    #[error("Invalid drawing record: {0}")]
    InvalidRecord(String),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read or parsed
    #[error("Config error in {path:?}: {message}")]
    Config { path: PathBuf, message: String },

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for dxf-vectorize operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}
