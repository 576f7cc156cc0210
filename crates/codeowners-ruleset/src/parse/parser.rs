//! Line and file-level parsers for CODEOWNERS files.
//!
//! This module combines the lexer components to parse complete lines
//! and entire CODEOWNERS files.

use std::io::Read;

use super::ast::{CodeownersFile, Owner, Rule};
use super::error::ParseError;
use super::lexer::{
    RuleComponents, SectionHeader, classify_owner, is_blank_line, parse_rule_components,
    parse_section_header, strip_comment, unescape,
};
use log::{debug, trace};

/// A classified line.
#[derive(Debug)]
enum Line<'a> {
    Blank,
    Section(SectionHeader<'a>),
    Rule(RuleComponents<'a>),
}

/// Parses a single line of a CODEOWNERS file.
///
/// Section headers are tried before rules, so `[Docs]` on its own is always
/// a header.
fn parse_line(line_text: &str, line_num: usize) -> Result<Line<'_>, ParseError> {
    let content = strip_comment(line_text);
    if is_blank_line(content) {
        return Ok(Line::Blank);
    }
    if let Ok((_, header)) = parse_section_header(content) {
        return Ok(Line::Section(header));
    }
    match parse_rule_components(content) {
        Ok((_, components)) => Ok(Line::Rule(components)),
        Err(_) => Err(ParseError::invalid_line(line_num, content.trim())),
    }
}

/// Parses a CODEOWNERS file.
///
/// Lines may end in `\n` or `\r\n`. Each rule records its 1-based line
/// number and the lower-cased name of the section it appears in.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered.
///
/// # Example
///
/// ```rust
/// use codeowners_ruleset::parse::{Owner, parse_codeowners};
///
/// let file = parse_codeowners("README.md @alice bob@example.com\n").unwrap();
/// assert_eq!(
///     file.rules[0].owners,
///     vec![Owner::handle("alice"), Owner::email("bob@example.com")]
/// );
/// ```
pub fn parse_codeowners(input: impl AsRef<[u8]>) -> Result<CodeownersFile, ParseError> {
    let input = input.as_ref();
    debug!("Parsing CODEOWNERS file ({} bytes)", input.len());

    let mut rules = Vec::new();
    let mut section = String::new();
    let mut section_count = 0;

    for (line_idx, raw_line) in input.split(|&b| b == b'\n').enumerate() {
        let line_num = line_idx + 1; // 1-based line numbers
        let raw_line = raw_line.strip_suffix(b"\r").unwrap_or(raw_line);
        let mut line_text =
            std::str::from_utf8(raw_line).map_err(|e| ParseError::invalid_utf8(line_num, e))?;
        if line_num == 1 {
            line_text = line_text.strip_prefix('\u{feff}').unwrap_or(line_text);
        }

        match parse_line(line_text, line_num)? {
            Line::Blank => trace!("Line {}: blank or comment", line_num),
            Line::Section(header) => {
                debug!(
                    "Line {}: entering section '{}' (optional={}, approvals={:?})",
                    line_num, header.name, header.optional, header.approvals
                );
                section = header.name.to_lowercase();
                section_count += 1;
            }
            Line::Rule(components) => {
                let owners: Vec<Owner> = components
                    .owners
                    .iter()
                    .map(|token| classify_owner(token))
                    .collect();
                trace!(
                    "Line {}: rule '{}' with {} owner(s)",
                    line_num,
                    components.pattern,
                    owners.len()
                );
                rules.push(Rule::new(
                    unescape(components.pattern),
                    owners,
                    section.clone(),
                    line_num,
                ));
            }
        }
    }

    debug!(
        "Parsing complete: {} rules, {} section headers",
        rules.len(),
        section_count
    );
    Ok(CodeownersFile::new(rules))
}

/// Reads all of `reader` and parses it as a CODEOWNERS file.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if reading fails, otherwise as
/// [`parse_codeowners`].
pub fn parse_reader<R: Read>(mut reader: R) -> Result<CodeownersFile, ParseError> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    parse_codeowners(&buffer)
}
