//! Parsing of reviewer rule files.
//!
//! The rule file is an ordered list of `pattern owner [owner ...]`
//! lines. Blank lines and lines starting with `#` are skipped, as are
//! lines that carry a pattern but no owners. Later rules take precedence
//! over earlier ones for files they both match.

mod lexer;

use log::{debug, warn};

use crate::matching::PathPattern;
use lexer::{is_blank_line, parse_comment_line, parse_rule_line};

/// A single `(pattern, owners)` rule, immutable once parsed.
#[derive(Debug, Clone)]
pub struct Rule {
    /// The compiled pattern.
    pub pattern: PathPattern,
    /// Owner tokens in file-declaration order.
    pub owners: Vec<String>,
}

/// An ordered, immutable collection of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parses rule file contents into an ordered rule set.
    ///
    /// Parsing never fails: malformed lines (no owners) are skipped
    /// silently and patterns whose glob form does not compile are
    /// skipped with a warning.
    pub fn parse(input: &str) -> Self {
        let mut rules = Vec::new();

        for (idx, line) in input.lines().enumerate() {
            let line_num = idx + 1;

            if is_blank_line(line) || parse_comment_line(line).is_ok() {
                continue;
            }

            match parse_rule_line(line) {
                Ok((_rest, components)) => match PathPattern::new(components.pattern) {
                    Some(pattern) => rules.push(Rule {
                        pattern,
                        owners: components.owners.iter().map(|s| s.to_string()).collect(),
                    }),
                    None => warn!(
                        "line {}: skipping rule with invalid pattern '{}'",
                        line_num, components.pattern
                    ),
                },
                Err(_) => {
                    debug!("line {}: skipping line without owners", line_num);
                }
            }
        }

        debug!("parsed {} reviewer rule(s)", rules.len());
        Self { rules }
    }

    /// Iterates the rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the set contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
