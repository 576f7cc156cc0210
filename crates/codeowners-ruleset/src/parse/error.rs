//! Error types for CODEOWNERS file parsing.

use thiserror::Error;

/// An error that made a CODEOWNERS file unparsable.
///
/// Parsing stops at the first error; no partial result is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A line is not valid UTF-8.
    #[error("line {line}: invalid UTF-8")]
    InvalidUtf8 {
        /// The line number (1-based).
        line: usize,
        /// The underlying decoding error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// A line is neither blank, a comment, a section header nor a rule.
    #[error("line {line}: could not parse '{content}'")]
    InvalidLine {
        /// The line number (1-based).
        line: usize,
        /// The offending line with its comment removed.
        content: String,
    },

    /// The input could not be read.
    #[error("failed to read CODEOWNERS input: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates an invalid UTF-8 error.
    pub fn invalid_utf8(line: usize, source: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 { line, source }
    }

    /// Creates an invalid line error.
    pub fn invalid_line(line: usize, content: impl Into<String>) -> Self {
        Self::InvalidLine {
            line,
            content: content.into(),
        }
    }

    /// Returns the line number where this error occurred, if it is tied to
    /// a line.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::InvalidUtf8 { line, .. } => Some(*line),
            ParseError::InvalidLine { line, .. } => Some(*line),
            ParseError::Io(_) => None,
        }
    }
}
