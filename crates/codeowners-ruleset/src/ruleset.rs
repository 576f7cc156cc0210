//! Queryable rulesets built from parsed CODEOWNERS files.
//!
//! A [`Ruleset`] answers "who owns this path?" with last-match-wins
//! semantics: rules are considered from the bottom of the file up and the
//! first one whose pattern matches decides. Sections are independent, each
//! with its own last match.
//!
//! Patterns are compiled lazily, the first time a rule is tested, and the
//! result is cached for the lifetime of the ruleset. A pattern that fails to
//! compile is logged once and never matches.

use std::fmt;
use std::path::PathBuf;

use log::{debug, warn};
use once_cell::sync::OnceCell;
use serde::Serialize;

use crate::matching::{CompiledPattern, PatternTrie, compile};
use crate::parse::{CodeownersFile, Owner, Rule};

/// Where a ruleset was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RulesetSource {
    /// A CODEOWNERS file committed to a repository.
    Git {
        /// Repository identifier.
        repo_id: i32,
        /// Commit the file was read at.
        commit: String,
        /// Path of the file within the repository.
        path: String,
    },
    /// A file uploaded out of band rather than read from the repository.
    Ingested {
        /// Identifier of the uploaded file.
        id: i32,
    },
    /// A file on the local filesystem.
    File {
        /// Path to the file.
        path: PathBuf,
    },
}

impl fmt::Display for RulesetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesetSource::Git {
                repo_id,
                commit,
                path,
            } => write!(f, "repo {} at {}:{}", repo_id, commit, path),
            RulesetSource::Ingested { id } => write!(f, "ingested file {}", id),
            RulesetSource::File { path } => write!(f, "{}", path.display()),
        }
    }
}

/// An immutable, thread-safe set of ownership rules.
#[derive(Debug)]
pub struct Ruleset {
    source: RulesetSource,
    file: CodeownersFile,
    compiled: Vec<OnceCell<Option<CompiledPattern>>>,
    trie: OnceCell<PatternTrie>,
    #[cfg(test)]
    compilations: std::sync::atomic::AtomicUsize,
}

impl Ruleset {
    /// Creates a ruleset from a parsed file.
    pub fn new(source: RulesetSource, file: CodeownersFile) -> Self {
        let compiled = (0..file.len()).map(|_| OnceCell::new()).collect();
        Self {
            source,
            file,
            compiled,
            trie: OnceCell::new(),
            #[cfg(test)]
            compilations: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Returns where this ruleset was loaded from.
    pub fn source(&self) -> &RulesetSource {
        &self.source
    }

    /// Returns the parsed file.
    pub fn file(&self) -> &CodeownersFile {
        &self.file
    }

    /// Returns the rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.file.rules
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.file.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }

    /// Returns the distinct section names in order of first appearance.
    pub fn sections(&self) -> Vec<&str> {
        self.file.sections()
    }

    /// Returns the compiled pattern of the rule at `index`, compiling it on
    /// first use.
    fn compiled(&self, index: usize) -> Option<&CompiledPattern> {
        self.compiled[index]
            .get_or_init(|| {
                #[cfg(test)]
                self.compilations
                    .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                let rule = &self.file.rules[index];
                match compile(&rule.pattern) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        warn!(
                            "Line {}: ignoring pattern '{}': {}",
                            rule.line_number, rule.pattern, e
                        );
                        None
                    }
                }
            })
            .as_ref()
    }

    fn rule_matches(&self, index: usize, path: &str) -> bool {
        self.compiled(index).is_some_and(|pattern| pattern.matches(path))
    }

    fn last_match(&self, path: &str, filter: impl Fn(&Rule) -> bool) -> Option<&Rule> {
        self.file
            .rules
            .iter()
            .enumerate()
            .rev()
            .find(|&(index, rule)| filter(rule) && self.rule_matches(index, path))
            .map(|(_, rule)| rule)
    }

    /// Returns the rule that decides ownership of `path`.
    ///
    /// The path is relative to the repository root; a leading `/` is
    /// optional. `None` means no rule matched, while a returned rule with no
    /// owners means the path is explicitly unowned.
    pub fn match_path(&self, path: &str) -> Option<&Rule> {
        self.last_match(path, |_| true)
    }

    /// Returns the owners of `path`.
    ///
    /// Empty both when no rule matched and when the matching rule is
    /// unowned; use [`Ruleset::match_path`] to tell the two apart.
    pub fn find_owners(&self, path: &str) -> &[Owner] {
        match self.match_path(path) {
            Some(rule) => &rule.owners,
            None => &[],
        }
    }

    /// Returns the last matching rule of one section.
    ///
    /// Section names compare case-insensitively; `""` is the default
    /// section.
    pub fn match_section(&self, section: &str, path: &str) -> Option<&Rule> {
        let section = section.trim().to_lowercase();
        self.last_match(path, |rule| rule.section_name == section)
    }

    /// Returns the last matching rule of every section that has one, in
    /// order of first appearance of the section.
    pub fn match_sections(&self, path: &str) -> Vec<&Rule> {
        self.sections()
            .into_iter()
            .filter_map(|section| self.last_match(path, |rule| rule.section_name == section))
            .collect()
    }

    fn trie(&self) -> &PatternTrie {
        self.trie.get_or_init(|| {
            let mut trie = PatternTrie::new();
            for index in 0..self.len() {
                if let Some(pattern) = self.compiled(index) {
                    trie.insert(pattern, index);
                }
            }
            debug!(
                "Built pattern trie for {}: {} patterns, {} nodes",
                self.source,
                trie.len(),
                trie.node_count()
            );
            trie
        })
    }

    /// Same as [`Ruleset::match_path`], evaluated on the pattern trie.
    ///
    /// The first call builds the trie, compiling every rule.
    pub fn match_path_with_trie(&self, path: &str) -> Option<&Rule> {
        self.trie()
            .best_match(path)
            .map(|index| &self.file.rules[index])
    }

    /// Matches many paths at once, returning the deciding rule of each path
    /// in input order.
    pub fn match_paths<S: AsRef<str>>(&self, paths: &[S]) -> Vec<Option<&Rule>> {
        self.trie()
            .best_matches(paths)
            .into_iter()
            .map(|best| best.map(|index| &self.file.rules[index]))
            .collect()
    }
}

/// Writes the canonical form of the underlying file.
impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file)
    }
}
