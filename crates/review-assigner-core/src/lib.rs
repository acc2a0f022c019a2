//! Review Assigner Core
//!
//! A library for turning a pull request's changed files into review
//! requests via a CODEOWNERS-style rule file.
//!
//! # Features
//!
//! - **Rules**: Parse a `REVIEWERS` file into an ordered rule list
//! - **Matching**: Last-match-wins path matching with directory-boundary
//!   and shell-glob semantics
//! - **Resolution**: Classify owner tokens and resolve emails to
//!   accounts, with rate-limit backoff
//! - **Assignment**: Author filtering and no-op detection before the
//!   review-request call
//!
//! # Quick Start
//!
//! ```rust
//! use review_assigner_core::matching::candidate_owners;
//! use review_assigner_core::rules::RuleSet;
//!
//! let rules = RuleSet::parse("src/ @alice @bob\nsrc/api/ @carol\n");
//!
//! let changed = vec![
//!     "src/util.py".to_string(),
//!     "src/api/handler.py".to_string(),
//! ];
//! let owners = candidate_owners(&rules, &changed);
//! assert_eq!(owners, ["@alice", "@bob", "@carol"]);
//! ```
//!
//! # Modules
//!
//! - [`rules`]: Rule file parsing
//! - [`matching`]: Path matching and precedence
//! - [`resolve`]: Owner token classification and resolution
//! - [`assign`]: Review request planning
//! - [`event`]: Pull-request event payload types
//! - [`github`]: The GitHub client trait boundary

use std::path::{Path, PathBuf};

pub mod assign;
pub mod event;
pub mod github;
pub mod matching;
pub mod resolve;
pub mod rules;

// Re-export commonly used types at the crate root
pub use assign::{AssignOutcome, ReviewRequest};
pub use event::{PullRequestEvent, load_event};
pub use github::{GithubClient, GithubClientError};
pub use matching::candidate_owners;
pub use resolve::{ResolvedReviewers, Resolver};
pub use rules::RuleSet;

/// Finds the reviewer rule file in a repository.
///
/// Searches in the following locations (in order):
/// 1. `REVIEWERS`
/// 2. `.github/REVIEWERS`
/// 3. `docs/REVIEWERS`
///
/// Returns `Some(path)` if found, `None` otherwise.
pub fn find_rules_file(repo_path: &Path) -> Option<PathBuf> {
    let locations = [
        repo_path.join("REVIEWERS"),
        repo_path.join(".github/REVIEWERS"),
        repo_path.join("docs/REVIEWERS"),
    ];
    locations.into_iter().find(|p| p.exists())
}
