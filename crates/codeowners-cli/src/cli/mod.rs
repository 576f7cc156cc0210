//! CLI module for the CODEOWNERS lookup tool.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support.

pub mod config;
pub mod output;
pub mod walker;

use clap::Parser;
use std::path::PathBuf;

/// CODEOWNERS lookup - shows who owns the files of a repository.
///
/// Reads the repository's CODEOWNERS file and prints, for every requested
/// file, the rule that decides its ownership and the owners it names.
/// Directories are expanded to the files they contain.
#[derive(Parser, Debug)]
#[command(name = "codeowners")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Files or directories to look up, relative to the repository root.
    /// Defaults to the whole repository.
    pub paths: Vec<PathBuf>,

    /// Path to the repository root.
    #[arg(long, env = "REPOSITORY_PATH", default_value = ".")]
    pub repository_path: PathBuf,

    /// CODEOWNERS file to use instead of searching the repository.
    #[arg(long, env = "CODEOWNERS_FILE")]
    pub codeowners_file: Option<PathBuf>,

    /// Only consider rules of this section.
    #[arg(long, conflicts_with = "all_sections")]
    pub section: Option<String>,

    /// Show the deciding rule of every section instead of the overall one.
    #[arg(long)]
    pub all_sections: bool,

    /// Include hidden files and directories when walking directories.
    #[arg(long, env = "INCLUDE_HIDDEN")]
    pub include_hidden: bool,

    /// Skip files ignored by .gitignore when walking directories.
    #[arg(long, env = "RESPECT_GITIGNORE")]
    pub respect_gitignore: bool,

    /// Only report files that have no owners.
    #[arg(long)]
    pub unowned: bool,

    /// Exit with code 3 if any reported file has no owners.
    #[arg(long)]
    pub fail_on_unowned: bool,

    /// Print the CODEOWNERS file in canonical form and exit.
    #[arg(long)]
    pub canonical: bool,

    /// Output results as JSON instead of human-readable format.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["codeowners"]).unwrap();
        assert!(args.paths.is_empty());
        assert_eq!(args.repository_path, PathBuf::from("."));
        assert!(args.codeowners_file.is_none());
        assert!(args.section.is_none());
        assert!(!args.all_sections);
        assert!(!args.json);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_paths_and_flags() {
        let args = Args::try_parse_from([
            "codeowners",
            "src",
            "README.md",
            "--section",
            "Docs",
            "--unowned",
            "-j",
            "-vv",
        ])
        .unwrap();
        assert_eq!(
            args.paths,
            vec![PathBuf::from("src"), PathBuf::from("README.md")]
        );
        assert_eq!(args.section.as_deref(), Some("Docs"));
        assert!(args.unowned);
        assert!(args.json);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_section_conflicts_with_all_sections() {
        let result =
            Args::try_parse_from(["codeowners", "--section", "docs", "--all-sections"]);
        assert!(result.is_err());
    }
}
