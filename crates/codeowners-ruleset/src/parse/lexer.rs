//! Lexer and token parsers for CODEOWNERS files.
//!
//! This module contains nom-based parsers for the pieces of a line:
//! trailing comments, section headers, rule components and mail addresses.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{anychar, char, digit1, satisfy},
    combinator::{all_consuming, opt, recognize},
    multi::{many0, many0_count, many1_count, separated_list1},
    sequence::{delimited, preceded},
};

use super::ast::Owner;

/// Token separators: space, tab, newline, form feed and carriage return.
///
/// Other Unicode spaces, such as U+00A0, are ordinary pattern characters.
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// Zero or more separator characters.
fn ws0(input: &str) -> IResult<&str, &str> {
    take_while(is_space).parse(input)
}

/// One or more separator characters.
fn ws1(input: &str) -> IResult<&str, &str> {
    take_while1(is_space).parse(input)
}

/// A backslash and the character it escapes.
fn escaped_char(input: &str) -> IResult<&str, &str> {
    recognize(preceded(char('\\'), anychar)).parse(input)
}

/// Returns the part of a line before its first unescaped `#`.
pub fn strip_comment(line: &str) -> &str {
    let content: IResult<&str, &str> = recognize(many0_count(alt((
        escaped_char,
        recognize(satisfy(|c| c != '#')),
    ))))
    .parse(line);
    content.map_or(line, |(_, content)| content)
}

/// Checks if a line is blank (empty or only whitespace).
pub fn is_blank_line(input: &str) -> bool {
    input.trim_matches(is_space).is_empty()
}

/// A section header such as `[Docs]`, `^[Docs]` or `[Docs][2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader<'a> {
    /// The section name with surrounding whitespace removed.
    pub name: &'a str,
    /// True for `^[Name]` headers.
    pub optional: bool,
    /// The approval count from a trailing `[N]`, if any.
    pub approvals: Option<u32>,
}

/// Parses a complete section header line.
pub fn parse_section_header(input: &str) -> IResult<&str, SectionHeader<'_>> {
    all_consuming((
        ws0,
        opt(char('^')),
        ws0,
        delimited(char('['), take_while1(|c: char| c != ']'), char(']')),
        ws0,
        opt(delimited(char('['), digit1, char(']'))),
        ws0,
    ))
    .map(|(_, caret, _, name, _, approvals, _)| SectionHeader {
        name: name.trim_matches(is_space),
        optional: caret.is_some(),
        approvals: approvals.and_then(|count: &str| count.parse().ok()),
    })
    .parse(input)
}

/// Result of parsing a rule line's components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleComponents<'a> {
    /// The pattern text, still escaped.
    pub pattern: &'a str,
    /// Owner tokens in order.
    pub owners: Vec<&'a str>,
}

/// A pattern: escaped characters or anything but whitespace.
fn pattern_token(input: &str) -> IResult<&str, &str> {
    recognize(many1_count(alt((
        escaped_char,
        recognize(satisfy(|c| !is_space(c))),
    ))))
    .parse(input)
}

fn owner_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !is_space(c)).parse(input)
}

/// Parses a complete rule line (comment already removed) into a pattern
/// and its owner tokens. A rule may have no owners.
pub fn parse_rule_components(input: &str) -> IResult<&str, RuleComponents<'_>> {
    all_consuming((
        ws0,
        pattern_token,
        many0(preceded(ws1, owner_token)),
        ws0,
    ))
    .map(|(_, pattern, owners, _)| RuleComponents { pattern, owners })
    .parse(input)
}

/// Removes one level of backslash escaping.
///
/// A trailing lone backslash is kept.
pub fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(next) = chars.next()
        {
            unescaped.push(next);
            continue;
        }
        unescaped.push(c);
    }
    unescaped
}

/// Characters allowed in a dot-atom of a mail address.
fn is_atext(c: char) -> bool {
    c.is_alphanumeric() || !c.is_ascii() || "!#$%&'*+-/=?^_`{|}~".contains(c)
}

fn dot_atom(input: &str) -> IResult<&str, &str> {
    recognize(separated_list1(char('.'), take_while1(is_atext))).parse(input)
}

fn addr_spec(input: &str) -> IResult<&str, &str> {
    recognize((dot_atom, char('@'), dot_atom)).parse(input)
}

/// Parses a mail address, either bare (`local@domain`) or in angle form
/// (`Name<local@domain>`), returning the bare address.
pub fn parse_mail_address(input: &str) -> IResult<&str, &str> {
    alt((
        all_consuming(addr_spec),
        all_consuming(preceded(
            take_while(|c: char| c != '<'),
            delimited(char('<'), addr_spec, char('>')),
        )),
    ))
    .parse(input)
}

/// Classifies an owner token.
pub fn classify_owner(token: &str) -> Owner {
    if let Some(handle) = token.strip_prefix('@') {
        return Owner::Handle(handle.to_string());
    }
    match parse_mail_address(token) {
        Ok((_, address)) => Owner::Email(address.to_string()),
        Err(_) => Owner::Handle(token.to_string()),
    }
}
