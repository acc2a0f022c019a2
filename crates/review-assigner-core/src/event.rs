//! Pull-request event payload loading.
//!
//! CI invocations receive the triggering event as a JSON file (the
//! `GITHUB_EVENT_PATH` convention). Only the fields the assigner needs
//! are modeled; a payload missing any of them is a fatal parse error.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading the event payload.
#[derive(Debug, Error)]
pub enum EventError {
    /// The payload file could not be read.
    #[error("failed to read event payload '{path}': {source}")]
    Read {
        /// The path that was attempted.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The payload is not valid JSON or lacks required fields.
    #[error("invalid event payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The triggering pull-request event.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    /// The pull request the event concerns.
    pub pull_request: PullRequest,
    /// The repository the event was raised in.
    pub repository: Repository,
}

/// The subset of pull-request fields the assigner uses.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// The PR number.
    pub number: u64,
    /// The PR author.
    pub user: Account,
}

/// A GitHub account reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    /// The account login.
    pub login: String,
}

/// A repository reference.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// The repository in `owner/repo` form.
    pub full_name: String,
}

/// Loads and validates the event payload from a file.
pub fn load_event(path: &Path) -> Result<PullRequestEvent, EventError> {
    let contents = std::fs::read_to_string(path).map_err(|source| EventError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}
