//! Error types for the text engine.
//!
//! Most operations in this crate cannot fail: malformed escapes and unknown
//! SGR codes are passed through verbatim and measured as zero width. The
//! errors that remain are I/O failures from a downstream sink and usage
//! errors when a caller builds an SGR sequence from malformed codes.

use thiserror::Error;

/// Errors produced by the text engine.
#[derive(Debug, Error)]
pub enum TextError {
    /// I/O error surfaced verbatim from the downstream writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An SGR code does not have the `digits(;digits)*` structure, or an
    /// extended colour code (`38`/`48`) has the wrong number of fields.
    #[error("malformed SGR code: {0:?}")]
    MalformedCode(String),
}

/// Result type for text engine operations.
pub type Result<T> = std::result::Result<T, TextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TextError::MalformedCode("38;5".to_string());
        assert!(err.to_string().contains("malformed SGR code"));
        assert!(err.to_string().contains("38;5"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: TextError = io_err.into();
        assert!(matches!(err, TextError::Io(_)));
    }
}
