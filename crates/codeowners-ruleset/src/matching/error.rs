//! Error types for pattern compilation.

use thiserror::Error;

/// An error that occurred while compiling a single CODEOWNERS pattern.
///
/// Compile errors never abort a ruleset: the affected rule simply never
/// matches.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    /// The pattern is the empty string.
    #[error("pattern is empty")]
    Empty,

    /// The pattern contains an empty segment, as in `a//b`.
    #[error("pattern '{pattern}' contains an empty path segment")]
    EmptySegment {
        /// The offending pattern.
        pattern: String,
    },

    /// A wildcard segment could not be turned into a matcher.
    #[error("segment '{segment}' of pattern '{pattern}' is not a valid glob")]
    Regex {
        /// The offending pattern.
        pattern: String,
        /// The segment that failed to compile.
        segment: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

impl CompileError {
    /// Creates an empty segment error.
    pub fn empty_segment(pattern: impl Into<String>) -> Self {
        Self::EmptySegment {
            pattern: pattern.into(),
        }
    }

    /// Creates a regex error for one segment of a pattern.
    pub fn regex(
        pattern: impl Into<String>,
        segment: impl Into<String>,
        source: regex::Error,
    ) -> Self {
        Self::Regex {
            pattern: pattern.into(),
            segment: segment.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_segment_message_names_pattern() {
        let error = CompileError::empty_segment("a//b");
        assert!(matches!(error, CompileError::EmptySegment { .. }));
        assert!(error.to_string().contains("a//b"));
    }

    #[test]
    fn empty_message() {
        assert_eq!(CompileError::Empty.to_string(), "pattern is empty");
    }
}
