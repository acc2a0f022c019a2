//! Path matching and precedence for reviewer rules.
//!
//! Patterns follow a deliberate subset of the CODEOWNERS convention:
//!
//! - a single leading `/` is stripped, so rooted and unrooted patterns
//!   are treated identically
//! - a trailing `/` marks a directory pattern, matching the directory
//!   itself and everything below it on an exact segment boundary
//! - anything else is a shell-style glob (`*`, `?`, `[...]`) where `*`
//!   does not cross `/`
//!
//! Precedence is last-match-wins per file: later rules overwrite (never
//! merge with) the owner list of earlier matching rules.

use globset::{GlobBuilder, GlobMatcher};
use std::collections::HashSet;

use crate::rules::RuleSet;

/// A compiled rule pattern that can match changed-file paths.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern text.
    original: String,
    /// How the pattern matches.
    kind: PatternKind,
}

#[derive(Debug, Clone)]
enum PatternKind {
    /// Trailing-slash pattern matching a whole subtree.
    Directory(String),
    /// Shell-style glob over the full path.
    Glob(GlobMatcher),
}

impl PathPattern {
    /// Compiles a pattern for matching.
    ///
    /// Returns `None` if the glob form is invalid.
    pub fn new(pattern: &str) -> Option<Self> {
        let normalized = pattern.strip_prefix('/').unwrap_or(pattern);

        let kind = if let Some(dir) = normalized.strip_suffix('/') {
            PatternKind::Directory(dir.to_string())
        } else {
            // literal_separator keeps * from crossing path boundaries
            let glob = GlobBuilder::new(normalized)
                .literal_separator(true)
                .build()
                .ok()?;
            PatternKind::Glob(glob.compile_matcher())
        };

        Some(Self {
            original: pattern.to_string(),
            kind,
        })
    }

    /// Returns the original pattern text.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Returns true if this is a directory (trailing-slash) pattern.
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, PatternKind::Directory(_))
    }

    /// Checks if this pattern matches the given repository-relative path.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.strip_prefix('/').unwrap_or(path);
        match &self.kind {
            PatternKind::Directory(dir) => {
                path == dir
                    || path
                        .strip_prefix(dir.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            PatternKind::Glob(matcher) => matcher.is_match(path),
        }
    }
}

/// Returns the winning owner list for a single changed file.
///
/// Rules are scanned in declaration order and the winner is overwritten
/// on every match, so the last matching rule decides. `None` if no rule
/// matched.
pub fn owners_for_path<'a>(rules: &'a RuleSet, path: &str) -> Option<&'a [String]> {
    let mut winner = None;
    for rule in rules.iter() {
        if rule.pattern.matches(path) {
            winner = Some(rule.owners.as_slice());
        }
    }
    winner
}

/// Unions the winning owner lists across all changed files.
///
/// The result is deduplicated preserving first occurrence, which keeps
/// operator output stable across runs. Files that match no rule
/// contribute nothing.
pub fn candidate_owners(rules: &RuleSet, files: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut owners = Vec::new();

    for file in files {
        if let Some(winning) = owners_for_path(rules, file) {
            for owner in winning {
                if seen.insert(owner.clone()) {
                    owners.push(owner.clone());
                }
            }
        }
    }

    owners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ruleset(input: &str) -> RuleSet {
        RuleSet::parse(input)
    }

    #[test]
    fn glob_simple() {
        let pattern = PathPattern::new("*.md").unwrap();
        assert!(pattern.matches("readme.md"));
        assert!(!pattern.matches("readme.txt"));
    }

    #[test]
    fn glob_does_not_cross_separator() {
        let pattern = PathPattern::new("*.md").unwrap();
        assert!(!pattern.matches("docs/readme.md"));
    }

    #[test]
    fn glob_question_mark_and_class() {
        let pattern = PathPattern::new("file.?").unwrap();
        assert!(pattern.matches("file.c"));
        assert!(!pattern.matches("file.cc"));

        let pattern = PathPattern::new("[ab].txt").unwrap();
        assert!(pattern.matches("a.txt"));
        assert!(pattern.matches("b.txt"));
        assert!(!pattern.matches("c.txt"));
    }

    #[test]
    fn directory_boundary() {
        let pattern = PathPattern::new("docs/").unwrap();
        assert!(pattern.is_directory());
        assert!(pattern.matches("docs/readme.md"));
        assert!(pattern.matches("docs/api/index.md"));
        assert!(pattern.matches("docs"));
        assert!(!pattern.matches("docs-internal/readme.md"));
        assert!(!pattern.matches("src/docs.rs"));
    }

    #[test]
    fn leading_slash_stripped() {
        let rooted = PathPattern::new("/docs/").unwrap();
        let unrooted = PathPattern::new("docs/").unwrap();
        for path in ["docs/readme.md", "docs", "docs-internal/x"] {
            assert_eq!(rooted.matches(path), unrooted.matches(path));
        }

        // One leading slash is also tolerated on the file path
        let pattern = PathPattern::new("*.rs").unwrap();
        assert!(pattern.matches("/main.rs"));
    }

    #[test]
    fn last_match_wins_overrides_entirely() {
        let rules = ruleset("*.go @A\ncmd/*.go @B\n");
        let winner = owners_for_path(&rules, "cmd/main.go").unwrap();
        assert_eq!(winner, ["@B"]);
    }

    #[test]
    fn last_match_wins_declaration_order() {
        let rules = ruleset("src/ @broad\nsrc/api/ @specific\n");
        assert_eq!(
            owners_for_path(&rules, "src/api/handler.py").unwrap(),
            ["@specific"]
        );
        assert_eq!(owners_for_path(&rules, "src/util.py").unwrap(), ["@broad"]);

        // Reversed declaration order flips the winner
        let rules = ruleset("src/api/ @specific\nsrc/ @broad\n");
        assert_eq!(
            owners_for_path(&rules, "src/api/handler.py").unwrap(),
            ["@broad"]
        );
    }

    #[test]
    fn no_match_contributes_nothing() {
        let rules = ruleset("src/ @alice\n");
        assert!(owners_for_path(&rules, "README.md").is_none());

        let files = vec!["README.md".to_string(), "LICENSE".to_string()];
        assert!(candidate_owners(&rules, &files).is_empty());
    }

    #[test]
    fn union_across_files() {
        let rules = ruleset("src/ @alice @bob\nsrc/api/ @carol\n");
        let files = vec!["src/util.py".to_string(), "src/api/handler.py".to_string()];
        let owners = candidate_owners(&rules, &files);
        assert_eq!(owners, ["@alice", "@bob", "@carol"]);
    }

    #[test]
    fn dedup_preserves_first_occurrence() {
        let rules = ruleset("*.rs @alice\ndocs/ @bob @alice\n");
        let files = vec!["main.rs".to_string(), "docs/guide.md".to_string()];
        let owners = candidate_owners(&rules, &files);
        assert_eq!(owners, ["@alice", "@bob"]);
    }

    #[test]
    fn matcher_is_idempotent() {
        let rules = ruleset("src/ @alice\n*.md @bob\n");
        let files = vec!["src/lib.rs".to_string(), "notes.md".to_string()];
        let first = candidate_owners(&rules, &files);
        let second = candidate_owners(&rules, &files);
        assert_eq!(first, second);
    }
}
