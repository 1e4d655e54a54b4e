//! Error types for the IRC line codec.
//!
//! Parsing itself is total and never fails. Errors only surface from the
//! strict UTF-8 entry point and from I/O-facing helpers.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The consumed part of a line was not valid UTF-8.
    #[error("invalid utf-8 at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte, relative to the start of the line.
        byte_pos: usize,
        /// Description from the UTF-8 decoder.
        details: String,
    },
}

impl From<std::str::Utf8Error> for ProtocolError {
    fn from(err: std::str::Utf8Error) -> Self {
        ProtocolError::InvalidUtf8 {
            byte_pos: err.valid_up_to(),
            details: err.to_string(),
        }
    }
}
