//! Output formatting for the CLI.
//!
//! This module provides human-readable and JSON output formatters for lookup
//! results.

use codeowners_ruleset::{Owner, Rule};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

/// The rule that decided ownership of a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    /// Section of the rule, empty for the default section.
    pub section: String,
    /// Line of the rule in the CODEOWNERS file.
    pub line: usize,
    /// The rule's pattern.
    pub pattern: String,
    /// Owners named by the rule.
    pub owners: Vec<Owner>,
}

impl From<&Rule> for RuleMatch {
    fn from(rule: &Rule) -> Self {
        Self {
            section: rule.section_name.clone(),
            line: rule.line_number,
            pattern: rule.pattern.clone(),
            owners: rule.owners.clone(),
        }
    }
}

/// Ownership of a single path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathOwnership {
    /// Repository path, `/`-rooted.
    pub path: String,
    /// Deciding rules; more than one only when looking up every section.
    pub matches: Vec<RuleMatch>,
}

impl PathOwnership {
    /// Creates the ownership record of `path` from its deciding rules.
    pub fn new<'a>(path: impl Into<String>, rules: impl IntoIterator<Item = &'a Rule>) -> Self {
        Self {
            path: path.into(),
            matches: rules.into_iter().map(RuleMatch::from).collect(),
        }
    }

    /// Returns true if no deciding rule names an owner.
    pub fn is_unowned(&self) -> bool {
        self.matches.iter().all(|m| m.owners.is_empty())
    }
}

/// JSON output document.
#[derive(Debug, Default, Serialize)]
pub struct JsonOutput {
    /// Source of the rules.
    pub codeowners: String,
    /// Looked up paths in input order.
    pub paths: Vec<PathOwnership>,
    /// Number of paths without owners.
    pub unowned: usize,
}

impl JsonOutput {
    /// Creates a new empty JSON output.
    pub fn new(codeowners: impl Into<String>) -> Self {
        Self {
            codeowners: codeowners.into(),
            ..Default::default()
        }
    }

    /// Adds the ownership of one path.
    pub fn add(&mut self, ownership: PathOwnership) {
        if ownership.is_unowned() {
            self.unowned += 1;
        }
        self.paths.push(ownership);
    }

    /// Writes the JSON output to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

/// Output formatter for human-readable console output.
pub struct HumanOutput<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> HumanOutput<W> {
    /// Creates a new human output formatter.
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Writes one path with its owners.
    ///
    /// Single-rule lookups print on one line; per-section lookups print one
    /// indented line per section.
    pub fn write_path(&mut self, ownership: &PathOwnership) -> std::io::Result<()> {
        let path = if self.use_colors {
            ownership.path.bold().to_string()
        } else {
            ownership.path.clone()
        };

        match ownership.matches.as_slice() {
            [] => {
                let label = self.unowned_label("(no matching rule)");
                writeln!(self.writer, "{}  {}", path, label)
            }
            [single] => {
                let owners = self.owners(single);
                writeln!(self.writer, "{}  {}", path, owners)
            }
            many => {
                writeln!(self.writer, "{}", path)?;
                for rule_match in many {
                    let section = if rule_match.section.is_empty() {
                        "(default)"
                    } else {
                        rule_match.section.as_str()
                    };
                    let owners = self.owners(rule_match);
                    writeln!(self.writer, "  [{}] {}", section, owners)?;
                }
                Ok(())
            }
        }
    }

    fn owners(&self, rule_match: &RuleMatch) -> String {
        if rule_match.owners.is_empty() {
            return self.unowned_label(&format!("(unowned, line {})", rule_match.line));
        }
        let owners = rule_match
            .owners
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        if self.use_colors {
            owners.cyan().to_string()
        } else {
            owners
        }
    }

    fn unowned_label(&self, label: &str) -> String {
        if self.use_colors {
            label.yellow().to_string()
        } else {
            label.to_string()
        }
    }

    /// Writes a summary of the lookup.
    pub fn write_summary(&mut self, total: usize, unowned: usize) -> std::io::Result<()> {
        writeln!(self.writer)?;

        if unowned == 0 {
            let message = format!("✓ All {} path(s) have owners", total);
            if self.use_colors {
                writeln!(self.writer, "{}", message.green().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        } else {
            let message = format!("✗ {} of {} path(s) have no owners", unowned, total);
            if self.use_colors {
                writeln!(self.writer, "{}", message.red().bold())?;
            } else {
                writeln!(self.writer, "{}", message)?;
            }
        }

        Ok(())
    }

    /// Writes a startup error.
    pub fn write_error(&mut self, message: &str) -> std::io::Result<()> {
        if self.use_colors {
            writeln!(self.writer, "{} {}", "Error:".red().bold(), message)?;
        } else {
            writeln!(self.writer, "Error: {}", message)?;
        }
        Ok(())
    }
}
