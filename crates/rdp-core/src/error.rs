//! Error types for reading and validating problem input.
//!
//! A missing cover is not an error: the search reports it as `None`.

use thiserror::Error;

/// Failure while reading connection parameters or the chunk list.
///
/// `line` is 1-based and refers to the input stream line that caused the error.
#[derive(Debug, Error)]
pub enum InputError {
    /// A value is missing, non-numeric, or a chunk line has the wrong field count.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A chunk whose range is empty, reversed, or starts before byte 0.
    #[error("invalid chunk range at line {line}: [{start}, {end})")]
    InvalidChunkRange { line: usize, start: i64, end: i64 },

    /// The underlying reader failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        InputError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    /// Input line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            InputError::MalformedInput { line, .. } | InputError::InvalidChunkRange { line, .. } => {
                Some(*line)
            }
            InputError::Io(_) => None,
        }
    }
}
