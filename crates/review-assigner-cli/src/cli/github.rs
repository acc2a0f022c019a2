//! GitHub client implementation using octocrab.
//!
//! All four API operations go through octocrab's generic `get`/`post`
//! verbs against explicit REST routes, so search, file listing, and the
//! review request share one HTTP abstraction and one error mapping.

use async_trait::async_trait;
use http::StatusCode;
use review_assigner_core::github::{GithubClient, GithubClientError};
use serde::{Deserialize, Serialize};

/// A wrapper around `octocrab::Octocrab` that implements `GithubClient`.
///
/// This wrapper is necessary due to Rust's orphan rules, which prevent
/// implementing external traits on external types.
pub struct OctocrabClient(pub octocrab::Octocrab);

impl OctocrabClient {
    /// Creates a new OctocrabClient from an Octocrab instance.
    pub fn new(client: octocrab::Octocrab) -> Self {
        Self(client)
    }
}

impl std::ops::Deref for OctocrabClient {
    type Target = octocrab::Octocrab;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

const FILES_PER_PAGE: usize = 100;

#[derive(Debug, Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
}

#[derive(Debug, Serialize)]
struct FilesQuery {
    per_page: usize,
    page: u32,
}

#[derive(Debug, Deserialize)]
struct SearchPage<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct UserItem {
    login: String,
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    author: Option<UserItem>,
}

#[derive(Debug, Deserialize)]
struct FileEntry {
    filename: String,
}

#[derive(Debug, Serialize)]
struct ReviewersBody<'a> {
    reviewers: &'a [String],
    team_reviewers: &'a [String],
}

/// Maps an octocrab error into the client error taxonomy.
///
/// GitHub signals search throttling with 403 as well as 429; both map
/// to the rate-limit variant the resolver's backoff keys on.
fn map_error(error: octocrab::Error) -> GithubClientError {
    match error {
        octocrab::Error::GitHub { ref source, .. } => match source.status_code {
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                GithubClientError::RateLimitExceeded
            }
            _ => GithubClientError::ApiError(error.to_string()),
        },
        other => GithubClientError::NetworkError(other.to_string()),
    }
}

#[async_trait]
impl GithubClient for OctocrabClient {
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<String>, GithubClientError> {
        let query = format!("{} in:email", email);
        let page: SearchPage<UserItem> = self
            .0
            .get("/search/users", Some(&SearchQuery { q: &query }))
            .await
            .map_err(map_error)?;
        Ok(page.items.into_iter().next().map(|user| user.login))
    }

    async fn find_commit_author(
        &self,
        repo: &str,
        email: &str,
    ) -> Result<Option<String>, GithubClientError> {
        let query = format!("author-email:{} repo:{}", email, repo);
        let page: SearchPage<CommitItem> = self
            .0
            .get("/search/commits", Some(&SearchQuery { q: &query }))
            .await
            .map_err(map_error)?;
        Ok(page
            .items
            .into_iter()
            .find_map(|commit| commit.author.map(|author| author.login)))
    }

    async fn list_changed_files(
        &self,
        repo: &str,
        number: u64,
    ) -> Result<Vec<String>, GithubClientError> {
        let route = format!("/repos/{}/pulls/{}/files", repo, number);
        let mut files = Vec::new();
        let mut page = 1u32;

        loop {
            let entries: Vec<FileEntry> = self
                .0
                .get(
                    route.as_str(),
                    Some(&FilesQuery {
                        per_page: FILES_PER_PAGE,
                        page,
                    }),
                )
                .await
                .map_err(map_error)?;
            let count = entries.len();
            files.extend(entries.into_iter().map(|entry| entry.filename));
            if count < FILES_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(files)
    }

    async fn request_reviewers(
        &self,
        repo: &str,
        number: u64,
        reviewers: &[String],
        team_reviewers: &[String],
    ) -> Result<(), GithubClientError> {
        let route = format!("/repos/{}/pulls/{}/requested_reviewers", repo, number);
        let _: serde_json::Value = self
            .0
            .post(
                route.as_str(),
                Some(&ReviewersBody {
                    reviewers,
                    team_reviewers,
                }),
            )
            .await
            .map_err(map_error)?;
        Ok(())
    }
}
