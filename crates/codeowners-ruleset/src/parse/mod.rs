//! Parser module for CODEOWNERS files.
//!
//! This module turns CODEOWNERS text into an ordered list of [`Rule`]s.
//! It understands trailing `#` comments, backslash escapes in patterns and
//! GitLab-style section headers (`[Name]`, `^[Name]`, `[Name][N]`).
//!
//! # Example
//!
//! ```rust
//! use codeowners_ruleset::parse::parse_codeowners;
//!
//! let input = r#"
//! # CODEOWNERS file
//! *.rs @rustacean
//!
//! [Docs]
//! /docs/ @docs-team
//! "#;
//!
//! let file = parse_codeowners(input).unwrap();
//! for rule in &file {
//!     println!("{} [{}] {:?}", rule.pattern, rule.section_name, rule.owners);
//! }
//! ```

mod ast;
mod error;
mod lexer;
mod parser;

// Re-export public types
pub use ast::{CodeownersFile, Owner, Rule};
pub use error::ParseError;
pub use parser::{parse_codeowners, parse_reader};

// Re-export lexer utilities that may be useful for custom parsing
pub use lexer::{SectionHeader, parse_mail_address, parse_section_header, strip_comment, unescape};
