//! CLI module for the review assigner.
//!
//! This module provides command-line argument parsing using Clap with
//! environment variable support, matching the conventions of GitHub
//! Actions (`GITHUB_TOKEN`, `GITHUB_EVENT_PATH`, `INPUT_*`).

pub mod config;
pub mod github;

use clap::Parser;
use std::path::PathBuf;

/// Assigns pull-request reviewers from a REVIEWERS rule file.
///
/// Matches the PR's changed files against CODEOWNERS-style rules,
/// resolves the matched owners to GitHub accounts, and requests review.
/// Intended to run once per pull-request event in CI.
#[derive(Parser, Debug)]
#[command(name = "review-assigner")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// GitHub token used for lookups and the review request.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to the rule file. When omitted, REVIEWERS, .github/REVIEWERS
    /// and docs/REVIEWERS are searched under the repository path.
    #[arg(long, env = "INPUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the repository root used for rule file discovery.
    #[arg(long, env = "REPOSITORY_PATH", default_value = ".")]
    pub repository_path: PathBuf,

    /// Path to the triggering pull-request event payload.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// GitHub base URL for API requests (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_BASE_URL", default_value = "https://api.github.com/")]
    pub github_base_url: String,

    /// Increase verbosity level (-v for debug, -vv for trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}
