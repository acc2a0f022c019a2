//! GitHub client trait abstraction.
//!
//! This module provides a trait-based abstraction for the GitHub API calls
//! the assigner needs, allowing different implementations (e.g., octocrab,
//! test mocks) behind a single seam.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the GitHub client.
#[derive(Debug, Error)]
pub enum GithubClientError {
    /// An API error occurred.
    #[error("GitHub API error: {0}")]
    ApiError(String),

    /// A network error occurred.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Trait for GitHub API client implementations.
///
/// All API access goes through this one abstraction so that search,
/// file listing, and review requests share a single retry/backoff
/// policy and can be mocked in unit tests.
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Searches for a user account whose public email matches `email`.
    ///
    /// Returns the login of the first match, or `None` if the search
    /// completed without a hit.
    async fn find_user_by_email(&self, email: &str)
    -> Result<Option<String>, GithubClientError>;

    /// Searches `repo` (in `owner/repo` form) for a commit authored with
    /// `email` and returns the attributed account login, if any.
    ///
    /// Commits without an attributed account (e.g., the email is not
    /// linked to any profile) do not count as matches.
    async fn find_commit_author(
        &self,
        repo: &str,
        email: &str,
    ) -> Result<Option<String>, GithubClientError>;

    /// Lists the changed file paths of a pull request.
    async fn list_changed_files(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Vec<String>, GithubClientError>;

    /// Requests review from the given users and teams on a pull request.
    ///
    /// Both lists are submitted in a single call; either may be empty,
    /// but callers are expected to skip the call entirely when both are.
    async fn request_reviewers(
        &self,
        repo: &str,
        number: u64,
        reviewers: &[String],
        team_reviewers: &[String],
    ) -> Result<(), GithubClientError>;
}
