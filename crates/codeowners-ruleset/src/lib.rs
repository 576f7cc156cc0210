//! CODEOWNERS Ruleset
//!
//! A library for parsing CODEOWNERS files and finding the owners of paths.
//!
//! # Features
//!
//! - **Parser**: Comments, backslash escapes and `[Section]` headers
//! - **Matcher**: Gitignore-style patterns evaluated with a bit-vector NFA
//! - **Ruleset**: Last-match-wins lookups, globally or per section
//! - **Bulk matching**: A pattern trie walked once per shared path prefix
//! - **Owner model**: Resolved people and teams behind handles and emails
//!
//! # Quick Start
//!
//! ```rust
//! use codeowners_ruleset::{Ruleset, RulesetSource, parse_codeowners};
//!
//! let input = r#"
//! # CODEOWNERS file
//! *        @default
//! *.rs     @rustacean
//! /docs/   @github/docs-team
//! /vendor/
//! "#;
//!
//! let file = parse_codeowners(input).unwrap();
//! let ruleset = Ruleset::new(RulesetSource::Ingested { id: 1 }, file);
//!
//! let rule = ruleset.match_path("/src/lib.rs").unwrap();
//! assert_eq!(rule.owners[0].to_string(), "@rustacean");
//!
//! // Explicitly unowned is not the same as unmatched
//! assert!(ruleset.match_path("/vendor/dep.c").unwrap().owners.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`parse`]: Parser for CODEOWNERS files
//! - [`matching`]: Pattern compilation and matching
//! - [`ruleset`]: Ownership lookups over a parsed file
//! - [`owners`]: Resolved owner identities

use std::path::{Path, PathBuf};

#[cfg(feature = "generate")]
pub mod generate;
pub mod matching;
pub mod owners;
pub mod parse;
pub mod ruleset;

// Re-export commonly used types at the crate root
pub use matching::{CompileError, CompiledPattern, compile};
pub use owners::{OwnerResolver, ResolvedOwner, UnresolvedOwners};
pub use parse::{CodeownersFile, Owner, ParseError, Rule, parse_codeowners, parse_reader};
pub use ruleset::{Ruleset, RulesetSource};

/// Finds the CODEOWNERS file in a repository.
///
/// Searches in the following locations (in order):
/// 1. `.github/CODEOWNERS`
/// 2. `CODEOWNERS`
/// 3. `docs/CODEOWNERS`
///
/// Returns `Some(path)` if found, `None` otherwise.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use codeowners_ruleset::find_codeowners_file;
///
/// let repo_path = Path::new("/path/to/repo");
/// if let Some(codeowners_path) = find_codeowners_file(repo_path) {
///     println!("Found CODEOWNERS at: {}", codeowners_path.display());
/// } else {
///     eprintln!("CODEOWNERS file not found");
/// }
/// ```
pub fn find_codeowners_file(repo_path: &Path) -> Option<PathBuf> {
    let locations = [
        repo_path.join(".github/CODEOWNERS"),
        repo_path.join("CODEOWNERS"),
        repo_path.join("docs/CODEOWNERS"),
    ];
    locations.into_iter().find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_codeowners_prefers_github_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".github")).unwrap();
        std::fs::write(dir.path().join("CODEOWNERS"), "* @root\n").unwrap();
        std::fs::write(dir.path().join(".github/CODEOWNERS"), "* @gh\n").unwrap();

        assert_eq!(
            find_codeowners_file(dir.path()),
            Some(dir.path().join(".github/CODEOWNERS"))
        );
    }

    #[test]
    fn find_codeowners_falls_back_to_docs() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/CODEOWNERS"), "").unwrap();
        assert_eq!(
            find_codeowners_file(dir.path()),
            Some(dir.path().join("docs/CODEOWNERS"))
        );
    }

    #[test]
    fn find_codeowners_missing() {
        let dir = TempDir::new().unwrap();
        // A directory named CODEOWNERS is not a file
        std::fs::create_dir_all(dir.path().join("CODEOWNERS")).unwrap();
        assert_eq!(find_codeowners_file(dir.path()), None);
    }
}
