// ─────────────────────────────────────────────────────────────────────
// NumBridge — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use std::path::PathBuf;

use thiserror::Error;

pub const STATUS_OK: i32 = 0;
pub const STATUS_IO: i32 = -1;
pub const STATUS_PARSE: i32 = -2;
pub const STATUS_TRUNCATED: i32 = -3;
pub const STATUS_INVALID_ARGUMENT: i32 = -4;
pub const STATUS_CONFIG: i32 = -5;

/// Root error type for all NumBridge failures.
#[derive(Error, Debug)]
pub enum NumBridgeError {
    /// Negative or inconsistent length/dimension, or a string that
    /// cannot cross a null-terminated boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// File could not be opened, read, or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line in the input is not a floating-point literal.
    #[error("parse error on line {line}: {text:?} is not a number")]
    Parse { line: usize, text: String },

    /// Fewer values available than requested.
    #[error("truncated input: expected {expected} values, found {found}")]
    TruncatedInput { expected: usize, found: usize },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

impl NumBridgeError {
    /// Status code reported across the `int (0 = success)` boundary.
    ///
    /// `-1` for I/O keeps parity with the C library this replaces.
    pub fn status_code(&self) -> i32 {
        match self {
            NumBridgeError::Io { .. } => STATUS_IO,
            NumBridgeError::Parse { .. } => STATUS_PARSE,
            NumBridgeError::TruncatedInput { .. } => STATUS_TRUNCATED,
            NumBridgeError::InvalidArgument(_) => STATUS_INVALID_ARGUMENT,
            NumBridgeError::Config(_) => STATUS_CONFIG,
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NumBridgeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type NumBridgeResult<T> = Result<T, NumBridgeError>;
