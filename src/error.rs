//! Error types for filekv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FileKvError
pub type Result<T> = std::result::Result<T, FileKvError>;

/// Unified error type for filekv operations
#[derive(Debug, Error)]
pub enum FileKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Key not found")]
    KeyNotFound,

    #[error("Key rejected: {0:?}")]
    KeyRejected(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Frame too short: {0} bytes")]
    FrameTooShort(usize),

    #[error("No recognized command in frame")]
    InvalidCommand,

    #[error("Wrong argument count for {0}")]
    MissingArgs(&'static str),

    #[error("Too many arguments")]
    TooManyArgs,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FileKvError {
    /// Decimal code carried by `ERROR:<n>` replies and log lines.
    ///
    /// Codes 2 (null input) and 4 (caller buffer) exist in the wire
    /// numbering but have no representable failure here; they stay
    /// reserved.
    pub fn wire_code(&self) -> u8 {
        match self {
            FileKvError::FrameTooShort(_) => 3,
            FileKvError::InvalidCommand => 5,
            FileKvError::MissingArgs(_) => 6,
            FileKvError::TooManyArgs => 7,
            _ => 1,
        }
    }
}
