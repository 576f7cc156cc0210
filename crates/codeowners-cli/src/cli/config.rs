//! Configuration handling for the CLI.
//!
//! This module turns CLI arguments into a validated configuration and loads
//! the ruleset it points at.

use crate::cli::Args;
use crate::cli::walker::WalkerConfig;
use codeowners_ruleset::{ParseError, Ruleset, RulesetSource, find_codeowners_file, parse_reader};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Failed to locate or open the CODEOWNERS file.
    #[error("failed to read CODEOWNERS file: {0}")]
    ReadCodeowners(String),

    /// The CODEOWNERS file could not be parsed.
    #[error("failed to parse CODEOWNERS file: {0}")]
    Parse(#[from] ParseError),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Lookup completed.
    Success = 0,
    /// Application startup failed (wrong configuration or unreadable file).
    StartupFailure = 1,
    /// Unowned paths were found and `--fail-on-unowned` was given.
    UnownedFound = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Which rules decide the owners of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupMode {
    /// The last matching rule of the whole file.
    Overall,
    /// The last matching rule of one section.
    Section(String),
    /// The last matching rule of every section.
    AllSections,
}

/// Validated and processed configuration for running a lookup.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Path to the repository root.
    pub repo_path: PathBuf,
    /// Path to the CODEOWNERS file.
    pub codeowners_path: PathBuf,
    /// Requested paths, relative to the repository root.
    pub paths: Vec<PathBuf>,
    /// Directory walking options.
    pub walker: WalkerConfig,
    /// How paths are looked up.
    pub mode: LookupMode,
    /// Only report unowned paths.
    pub unowned_only: bool,
    /// Fail when an unowned path is reported.
    pub fail_on_unowned: bool,
    /// Print the canonical file instead of looking up paths.
    pub canonical: bool,
    /// Whether to output JSON.
    pub json_output: bool,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let repo_path = args.repository_path.canonicalize().map_err(|e| {
            ConfigError::Invalid(format!(
                "repository path '{}' is invalid: {}",
                args.repository_path.display(),
                e
            ))
        })?;

        let codeowners_path = match &args.codeowners_file {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.clone()
                } else {
                    repo_path.join(path)
                };
                if !path.is_file() {
                    return Err(ConfigError::ReadCodeowners(format!(
                        "'{}' is not a file",
                        path.display()
                    )));
                }
                path
            }
            None => find_codeowners_file(&repo_path).ok_or_else(|| {
                ConfigError::ReadCodeowners(format!(
                    "CODEOWNERS file not found in repository '{}'. Searched in: .github/CODEOWNERS, CODEOWNERS, docs/CODEOWNERS",
                    repo_path.display()
                ))
            })?,
        };

        let mode = match (&args.section, args.all_sections) {
            (Some(section), _) if section.trim().is_empty() => {
                return Err(ConfigError::Invalid(
                    "section name must not be empty".to_string(),
                ));
            }
            (Some(section), _) => LookupMode::Section(section.clone()),
            (None, true) => LookupMode::AllSections,
            (None, false) => LookupMode::Overall,
        };

        for path in &args.paths {
            if path.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "path '{}' must be relative to the repository root",
                    path.display()
                )));
            }
        }

        Ok(Self {
            repo_path,
            codeowners_path,
            paths: args.paths.clone(),
            walker: WalkerConfig::new()
                .with_hidden(args.include_hidden)
                .with_gitignore(args.respect_gitignore),
            mode,
            unowned_only: args.unowned,
            fail_on_unowned: args.fail_on_unowned,
            canonical: args.canonical,
            json_output: args.json,
        })
    }

    /// Reads and parses the CODEOWNERS file into a ruleset.
    pub fn load_ruleset(&self) -> Result<Ruleset, ConfigError> {
        let file = File::open(&self.codeowners_path).map_err(|e| {
            ConfigError::ReadCodeowners(format!("'{}': {}", self.codeowners_path.display(), e))
        })?;
        let parsed = parse_reader(BufReader::new(file))?;
        info!(
            "Loaded {} rules from {}",
            parsed.len(),
            self.codeowners_path.display()
        );

        let ruleset = Ruleset::new(
            RulesetSource::File {
                path: self.codeowners_path.clone(),
            },
            parsed,
        );
        debug!("Sections: {:?}", ruleset.sections());
        Ok(ruleset)
    }

    /// Determines the exit code from the number of unowned paths found.
    pub fn exit_code_for_results(&self, unowned: usize) -> ExitCode {
        if self.fail_on_unowned && unowned > 0 {
            ExitCode::UnownedFound
        } else {
            ExitCode::Success
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".github")).unwrap();
        fs::write(dir.path().join(".github/CODEOWNERS"), content).unwrap();
        dir
    }

    fn args(dir: &TempDir, extra: &[&str]) -> Args {
        let mut argv = vec![
            "codeowners",
            "--repository-path",
            dir.path().to_str().unwrap(),
        ];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::StartupFailure), 1);
        assert_eq!(i32::from(ExitCode::UnownedFound), 3);
    }

    #[test]
    fn test_finds_codeowners_file() {
        let dir = create_test_repo("* @owner\n");
        let config = ValidatedConfig::from_args(&args(&dir, &[])).unwrap();
        assert!(config.codeowners_path.ends_with(".github/CODEOWNERS"));
        assert_eq!(config.mode, LookupMode::Overall);
    }

    #[test]
    fn test_missing_codeowners_file() {
        let dir = TempDir::new().unwrap();
        let err = ValidatedConfig::from_args(&args(&dir, &[])).unwrap_err();
        assert!(matches!(err, ConfigError::ReadCodeowners(_)));
    }

    #[test]
    fn test_explicit_codeowners_file() {
        let dir = create_test_repo("* @owner\n");
        fs::write(dir.path().join("OWNERS.custom"), "*.md @docs\n").unwrap();
        let config =
            ValidatedConfig::from_args(&args(&dir, &["--codeowners-file", "OWNERS.custom"]))
                .unwrap();
        assert!(config.codeowners_path.ends_with("OWNERS.custom"));

        let ruleset = config.load_ruleset().unwrap();
        assert_eq!(ruleset.len(), 1);
        assert_eq!(ruleset.rules()[0].pattern, "*.md");
    }

    #[test]
    fn test_invalid_repository_path() {
        let args = Args::parse_from([
            "codeowners",
            "--repository-path",
            "/definitely/not/a/real/path",
        ]);
        let err = ValidatedConfig::from_args(&args).unwrap_err();
        assert!(err.to_string().contains("repository path"));
    }

    #[test]
    fn test_section_modes() {
        let dir = create_test_repo("* @owner\n");
        let config = ValidatedConfig::from_args(&args(&dir, &["--section", "Docs"])).unwrap();
        assert_eq!(config.mode, LookupMode::Section("Docs".to_string()));

        let config = ValidatedConfig::from_args(&args(&dir, &["--all-sections"])).unwrap();
        assert_eq!(config.mode, LookupMode::AllSections);

        let err = ValidatedConfig::from_args(&args(&dir, &["--section", " "])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_absolute_path_rejected() {
        let dir = create_test_repo("* @owner\n");
        let err = ValidatedConfig::from_args(&args(&dir, &["/etc/passwd"])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let dir = create_test_repo("*.rs @owner\n");
        fs::write(dir.path().join(".github/CODEOWNERS"), b"*.rs @a\n\xff @b\n").unwrap();
        let config = ValidatedConfig::from_args(&args(&dir, &[])).unwrap();
        let err = config.load_ruleset().unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_file_removed_after_validation() {
        let dir = create_test_repo("* @owner\n");
        let config = ValidatedConfig::from_args(&args(&dir, &[])).unwrap();
        fs::remove_file(&config.codeowners_path).unwrap();

        let err = config.load_ruleset().unwrap_err();
        assert!(matches!(err, ConfigError::ReadCodeowners(_)));
        assert!(err.to_string().contains("CODEOWNERS"));
    }

    #[test]
    fn test_exit_code_for_results() {
        let dir = create_test_repo("* @owner\n");
        let config = ValidatedConfig::from_args(&args(&dir, &[])).unwrap();
        assert_eq!(config.exit_code_for_results(5), ExitCode::Success);

        let config = ValidatedConfig::from_args(&args(&dir, &["--fail-on-unowned"])).unwrap();
        assert_eq!(config.exit_code_for_results(0), ExitCode::Success);
        assert_eq!(config.exit_code_for_results(1), ExitCode::UnownedFound);
    }
}
