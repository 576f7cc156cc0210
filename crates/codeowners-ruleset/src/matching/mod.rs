//! Pattern matching for CODEOWNERS files.
//!
//! A pattern is compiled into a sequence of [`PatternPart`]s, one per path
//! segment, and evaluated against a path by simulating a small NFA over
//! those parts:
//!
//! - `*` matches exactly one path segment
//! - `**` matches zero or more path segments
//! - a segment mixing literal text and `*` (e.g. `*.rs`) matches one segment,
//!   with `*` never crossing a `/`
//! - a pattern without a leading `/` matches at any depth
//! - a trailing `/` matches everything below the directory, but not the
//!   directory itself
//!
//! `?` and `[...]` have no special meaning and are matched literally.
//!
//! # Example
//!
//! ```rust
//! use codeowners_ruleset::matching::compile;
//!
//! let pattern = compile("/docs/").unwrap();
//! assert!(pattern.matches("/docs/guide/intro.md"));
//! assert!(!pattern.matches("/documentation"));
//! ```

mod error;
mod nfa;
mod path_tree;
mod trie;

pub use error::CompileError;
pub use nfa::StateSet;
pub use trie::PatternTrie;

use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One compiled segment of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternPart {
    /// A literal segment that must equal the path segment.
    Exact(String),
    /// `*`: any single segment.
    AnyMatch,
    /// `**`: zero or more segments.
    AnySubPath,
    /// A segment mixing literal text with `*`, such as `*.rs` or `test_*`.
    Asterisk(SegmentGlob),
}

impl PatternPart {
    /// Returns true if this part consumes `segment` and advances.
    ///
    /// [`PatternPart::AnySubPath`] never advances on a segment; it loops on
    /// itself and is skipped through epsilon moves instead.
    pub fn matches_segment(&self, segment: &str) -> bool {
        match self {
            PatternPart::Exact(text) => text == segment,
            PatternPart::AnyMatch => true,
            PatternPart::AnySubPath => false,
            PatternPart::Asterisk(glob) => glob.is_match(segment),
        }
    }

    /// Returns true for the `**` part.
    pub fn is_any_sub_path(&self) -> bool {
        matches!(self, PatternPart::AnySubPath)
    }
}

impl fmt::Display for PatternPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternPart::Exact(text) => write!(f, "{}", text),
            PatternPart::AnyMatch => write!(f, "*"),
            PatternPart::AnySubPath => write!(f, "**"),
            PatternPart::Asterisk(glob) => write!(f, "{}", glob.as_str()),
        }
    }
}

/// A single-segment glob where `*` matches any run of non-slash characters.
///
/// Two globs are equal when their source text is equal.
#[derive(Debug, Clone)]
pub struct SegmentGlob {
    glob: String,
    regex: Regex,
}

impl SegmentGlob {
    fn new(pattern: &str, segment: &str) -> Result<Self, CompileError> {
        let body = segment
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("[^/]*");
        let regex = Regex::new(&format!("^{}$", body))
            .map_err(|e| CompileError::regex(pattern, segment, e))?;
        Ok(Self {
            glob: segment.to_string(),
            regex,
        })
    }

    /// Returns the glob text this matcher was built from.
    pub fn as_str(&self) -> &str {
        &self.glob
    }

    /// Returns true if the whole segment matches the glob.
    pub fn is_match(&self, segment: &str) -> bool {
        self.regex.is_match(segment)
    }
}

impl PartialEq for SegmentGlob {
    fn eq(&self, other: &Self) -> bool {
        self.glob == other.glob
    }
}

impl Eq for SegmentGlob {}

impl Hash for SegmentGlob {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.glob.hash(state);
    }
}

/// A compiled CODEOWNERS pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    original: String,
    parts: Vec<PatternPart>,
}

impl CompiledPattern {
    /// Returns the pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns the compiled parts.
    pub fn parts(&self) -> &[PatternPart] {
        &self.parts
    }

    /// Returns true if the pattern is anchored to the repository root.
    pub fn is_anchored(&self) -> bool {
        self.original.starts_with('/')
    }

    /// Checks whether `path` is matched by this pattern.
    ///
    /// The path is relative to the repository root; a leading `/` is
    /// optional and empty segments are ignored.
    pub fn matches(&self, path: &str) -> bool {
        let accept = self.parts.len();
        let mut current = StateSet::new(accept + 1);
        let mut next = StateSet::new(accept + 1);

        current.insert(0);
        self.epsilon_closure(&mut current);

        for segment in path_segments(path) {
            next.clear();
            for state in current.iter().filter(|&s| s < accept) {
                let part = &self.parts[state];
                if part.is_any_sub_path() {
                    next.insert(state);
                } else if part.matches_segment(segment) {
                    next.insert(state + 1);
                }
            }
            if next.is_empty() {
                return false;
            }
            self.epsilon_closure(&mut next);
            std::mem::swap(&mut current, &mut next);
        }

        current.contains(accept)
    }

    // Epsilon edges only point forward, so one ascending pass reaches the
    // closure.
    fn epsilon_closure(&self, states: &mut StateSet) {
        for (index, part) in self.parts.iter().enumerate() {
            if part.is_any_sub_path() && states.contains(index) {
                states.insert(index + 1);
            }
        }
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Compiles a CODEOWNERS pattern into its parts.
///
/// # Errors
///
/// Returns a [`CompileError`] for an empty pattern, an empty segment such as
/// `a//b`, or a wildcard segment that cannot be compiled.
pub fn compile(pattern: &str) -> Result<CompiledPattern, CompileError> {
    if pattern.is_empty() {
        return Err(CompileError::Empty);
    }
    if pattern.contains("//") {
        return Err(CompileError::empty_segment(pattern));
    }

    let mut parts = Vec::new();
    if !pattern.starts_with('/') {
        push_part(&mut parts, PatternPart::AnySubPath);
    }

    let body = pattern.trim_matches('/');
    if !body.is_empty() {
        for segment in body.split('/') {
            push_part(&mut parts, compile_segment(pattern, segment)?);
        }
    }

    if pattern.ends_with('/') {
        push_part(&mut parts, PatternPart::AnySubPath);
    }
    if parts.last().is_some_and(PatternPart::is_any_sub_path) {
        parts.push(PatternPart::AnyMatch);
    }

    Ok(CompiledPattern {
        original: pattern.to_string(),
        parts,
    })
}

fn compile_segment(pattern: &str, segment: &str) -> Result<PatternPart, CompileError> {
    match segment {
        "" => Err(CompileError::empty_segment(pattern)),
        "**" => Ok(PatternPart::AnySubPath),
        "*" => Ok(PatternPart::AnyMatch),
        s if s.contains('*') => SegmentGlob::new(pattern, s).map(PatternPart::Asterisk),
        s => Ok(PatternPart::Exact(s.to_string())),
    }
}

// Consecutive `**` parts accept the same paths as a single one.
fn push_part(parts: &mut Vec<PatternPart>, part: PatternPart) {
    if part.is_any_sub_path() && parts.last().is_some_and(PatternPart::is_any_sub_path) {
        return;
    }
    parts.push(part);
}

/// Splits a repository path into its non-empty segments.
pub(crate) fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
