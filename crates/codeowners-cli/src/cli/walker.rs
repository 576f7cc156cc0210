//! Expands the requested paths into repository files.

use ignore::WalkBuilder;
use std::path::Path;
use tracing::{debug, trace};

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Whether to include hidden files and directories (starting with `.`).
    /// Default: false
    pub include_hidden: bool,
    /// Whether to respect `.gitignore` rules (only works in git repos).
    /// Default: false
    pub respect_gitignore: bool,
}

impl WalkerConfig {
    /// Creates a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to include hidden files.
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether to respect .gitignore rules.
    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }
}

/// Lists the files below `start`, which must be inside `repo_path`.
///
/// Returns paths relative to `repo_path`, with forward slashes and a
/// leading `/`, sorted.
pub fn list_files(repo_path: &Path, start: &Path, config: &WalkerConfig) -> Vec<String> {
    debug!(
        "Listing files in {:?} (hidden={}, gitignore={})",
        start, config.include_hidden, config.respect_gitignore
    );

    let walker = WalkBuilder::new(start)
        .hidden(!config.include_hidden) // hidden(true) = skip hidden files
        .ignore(false) // Don't respect .ignore files (not a git standard)
        .git_ignore(config.respect_gitignore)
        .git_global(config.respect_gitignore)
        .git_exclude(config.respect_gitignore)
        .follow_links(false)
        .build();

    let mut files: Vec<String> = walker
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter_map(|entry| repo_relative(repo_path, entry.path()))
        .collect();
    files.sort();

    debug!("Found {} files", files.len());
    trace!("Files: {:?}", files);
    files
}

/// Expands `requested` paths into repository paths.
///
/// Directories are walked; anything else, including paths that do not
/// exist, is passed through unchanged so it can still be looked up. An empty
/// request means the whole repository.
pub fn expand_paths(
    repo_path: &Path,
    requested: &[impl AsRef<Path>],
    config: &WalkerConfig,
) -> Vec<String> {
    if requested.is_empty() {
        return list_files(repo_path, repo_path, config);
    }

    let mut paths = Vec::new();
    for path in requested {
        let full = repo_path.join(path.as_ref());
        if full.is_dir() {
            paths.extend(list_files(repo_path, &full, config));
        } else if let Some(relative) = repo_relative(repo_path, &full) {
            paths.push(relative);
        }
    }
    paths
}

// Returns `/`-rooted, forward-slash path of `path` relative to the repository.
fn repo_relative(repo_path: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(repo_path).ok()?;
    let text = relative.to_str()?.replace('\\', "/");
    Some(format!("/{}", text.trim_start_matches('/')))
}
