//! Error types for chatfmt library.

use std::io;
use thiserror::Error;

/// Result type alias for chatfmt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing an answer.
///
/// The pipeline itself degrades gracefully on malformed markdown, unknown
/// table placeholders and unsafe markup. Errors are reserved for input the
/// pipeline refuses to handle at all and for the I/O and serialization
/// edges around it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The answer exceeds the configured size limit.
    #[error("Input too large: {len} bytes (limit is {limit} bytes)")]
    InputTooLarge {
        /// Size of the rejected input in bytes
        len: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// The table dataset could not be decoded.
    #[error("Invalid table dataset: {0}")]
    InvalidTables(String),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidTables(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InputTooLarge {
            len: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "Input too large: 2048 bytes (limit is 1024 bytes)"
        );

        let err = Error::Render("bad block".to_string());
        assert_eq!(err.to_string(), "Rendering error: bad block");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::InvalidTables(_)));
    }
}
