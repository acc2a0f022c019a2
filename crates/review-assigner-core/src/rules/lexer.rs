//! Token parsers for reviewer rule files.
//!
//! This module contains nom-based parsers for rule lines. A rule line is
//! a pattern followed by one or more owner tokens, all separated by
//! whitespace. There is no escaping, no quoting, and no mid-line comment
//! support: every token after the pattern is taken as an owner.

use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::{char, space0, space1},
    combinator::rest,
};

/// Characters that can appear in a pattern or owner token.
fn is_token_char(c: char) -> bool {
    !c.is_whitespace()
}

/// Parses a complete comment line (optional whitespace + # + content).
pub fn parse_comment_line(input: &str) -> IResult<&str, &str> {
    (space0, char('#'), rest)
        .map(|(_, _, content)| content)
        .parse(input)
}

/// Checks if a line is blank (empty or only whitespace).
pub fn is_blank_line(input: &str) -> bool {
    input.trim().is_empty()
}

/// The raw components of a rule line.
#[derive(Debug, Clone)]
pub struct RuleComponents<'a> {
    /// The pattern text, in its literal form.
    pub pattern: &'a str,
    /// The owner tokens, in declaration order.
    pub owners: Vec<&'a str>,
}

/// Parses the components of a rule line (pattern + owners).
///
/// Fails if the line holds fewer than two tokens; callers skip such
/// lines silently.
pub fn parse_rule_line(input: &str) -> IResult<&str, RuleComponents<'_>> {
    let (after_ws, _) = space0(input)?;
    let (after_pattern, pattern) = take_while1(is_token_char)(after_ws)?;
    let (after_sep, _) = space1(after_pattern)?;

    let mut owners = Vec::new();
    let mut current = after_sep;

    loop {
        let (after_ws, _) = space0(current)?;
        if after_ws.is_empty() {
            break;
        }
        let (after_owner, owner) = take_while1(is_token_char)(after_ws)?;
        owners.push(owner);
        current = after_owner;
    }

    if owners.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Many1,
        )));
    }

    Ok((current, RuleComponents { pattern, owners }))
}
