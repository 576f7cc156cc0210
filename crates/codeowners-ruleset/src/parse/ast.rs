//! Data structures for parsed CODEOWNERS files.

use serde::Serialize;
use std::fmt::{self, Display};

use super::lexer;

/// An owner reference as written after a pattern.
///
/// Owners are kept as literal text; resolving them to people or teams is the
/// job of an [`OwnerResolver`](crate::owners::OwnerResolver).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    /// A handle such as `alice` or `org/team`, without the leading `@`.
    Handle(String),
    /// A plain email address.
    Email(String),
}

impl Owner {
    /// Creates a handle owner.
    pub fn handle(handle: impl Into<String>) -> Self {
        Self::Handle(handle.into())
    }

    /// Creates an email owner.
    pub fn email(email: impl Into<String>) -> Self {
        Self::Email(email.into())
    }

    /// Classifies a single owner token.
    ///
    /// `@`-prefixed tokens are handles. Otherwise a token that parses as a
    /// mail address becomes an email owner, and anything else is kept as a
    /// bare handle.
    pub fn parse(token: &str) -> Self {
        lexer::classify_owner(token)
    }

    /// Returns the handle, if this is a handle owner.
    pub fn as_handle(&self) -> Option<&str> {
        match self {
            Owner::Handle(handle) => Some(handle),
            Owner::Email(_) => None,
        }
    }

    /// Returns the email address, if this is an email owner.
    pub fn as_email(&self) -> Option<&str> {
        match self {
            Owner::Handle(_) => None,
            Owner::Email(email) => Some(email),
        }
    }
}

impl Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Handle(handle) => write!(f, "@{}", handle),
            Owner::Email(email) => f.write_str(email),
        }
    }
}

/// One ownership rule: a pattern, its owners and where it was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// The unescaped pattern text.
    pub pattern: String,
    /// Owners in declaration order. Empty means explicitly unowned.
    pub owners: Vec<Owner>,
    /// Lower-cased name of the enclosing section, empty for the default one.
    pub section_name: String,
    /// 1-based line number in the source file.
    pub line_number: usize,
}

impl Rule {
    /// Creates a new rule.
    pub fn new(
        pattern: impl Into<String>,
        owners: Vec<Owner>,
        section_name: impl Into<String>,
        line_number: usize,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            owners,
            section_name: section_name.into(),
            line_number,
        }
    }

    /// Returns true if the rule declares no owners.
    pub fn is_unowned(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Writes the rule line without its section header.
impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", EscapedPattern(&self.pattern))?;
        for owner in &self.owners {
            write!(f, " {}", owner)?;
        }
        Ok(())
    }
}

/// Escapes a pattern so that it parses back to the same text.
struct EscapedPattern<'a>(&'a str);

impl Display for EscapedPattern<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, c) in self.0.chars().enumerate() {
            let leading_marker = index == 0 && (c == '[' || c == '^');
            if lexer::is_space(c) || c == '#' || c == '\\' || leading_marker {
                f.write_str("\\")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// A parsed CODEOWNERS file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeownersFile {
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
}

impl CodeownersFile {
    /// Creates a file from its rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the file has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over the rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Returns the distinct section names in order of first appearance.
    ///
    /// The default section is included as `""` when it has rules.
    pub fn sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !sections.contains(&rule.section_name.as_str()) {
                sections.push(&rule.section_name);
            }
        }
        sections
    }
}

impl<'a> IntoIterator for &'a CodeownersFile {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Writes the canonical form of the file.
///
/// A `[section]` header is emitted whenever the section differs from the
/// previous rule's, followed by one line per rule.
impl Display for CodeownersFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_section = "";
        for rule in &self.rules {
            if rule.section_name != current_section {
                writeln!(f, "[{}]", rule.section_name)?;
                current_section = &rule.section_name;
            }
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
