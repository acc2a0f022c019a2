//! Review request planning and submission.
//!
//! The final step before the API call: drop the PR author from the
//! resolved users, and skip the call entirely when nothing is left to
//! assign.

use log::info;

use crate::github::{GithubClient, GithubClientError};
use crate::resolve::ResolvedReviewers;

/// The reviewer and team lists to submit for a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    /// Usernames to request review from.
    pub users: Vec<String>,
    /// Team handles (`org/team`) to request review from.
    pub teams: Vec<String>,
}

/// The outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    /// Reviewers and/or teams were requested.
    Requested,
    /// Both lists were empty; no API call was made.
    NothingToAssign,
}

impl ReviewRequest {
    /// Builds a request from resolved reviewers, excluding the PR author.
    ///
    /// The author is matched by exact login; teams pass through even
    /// when the author was the only matched user.
    pub fn new(resolved: ResolvedReviewers, pr_author: &str) -> Self {
        let users = resolved
            .users
            .into_iter()
            .filter(|login| {
                if login == pr_author {
                    info!("skipping PR author: @{}", login);
                    false
                } else {
                    true
                }
            })
            .collect();

        Self {
            users,
            teams: resolved.teams,
        }
    }

    /// Returns true if there is nothing to submit.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.teams.is_empty()
    }

    /// Submits the request, or reports a no-op when both lists are empty.
    ///
    /// A submission failure is terminal for the run; it is never retried.
    pub async fn submit(
        &self,
        client: &dyn GithubClient,
        repo: &str,
        number: u64,
    ) -> Result<AssignOutcome, GithubClientError> {
        if self.is_empty() {
            return Ok(AssignOutcome::NothingToAssign);
        }

        client
            .request_reviewers(repo, number, &self.users, &self.teams)
            .await?;
        Ok(AssignOutcome::Requested)
    }
}
