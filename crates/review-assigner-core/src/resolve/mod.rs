//! Owner token classification and resolution.
//!
//! Raw owner tokens from the rule file come in three lexical shapes:
//! `@org/team`, `@username` (or bare `username`), and `email@domain`.
//! Teams and usernames resolve lexically; emails require GitHub lookups
//! with a fixed backoff on rate limits. An unresolved email is dropped
//! with a warning and never fails the run.

use log::{debug, info, warn};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

use crate::github::{GithubClient, GithubClientError};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email regex must compile")
});

/// Maximum user-search attempts per email, counting the first.
const MAX_SEARCH_ATTEMPTS: u32 = 3;

/// Wait between rate-limited search attempts.
const DEFAULT_BACKOFF: Duration = Duration::from_secs(60);

/// The lexical shape of a raw owner token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerKind {
    /// A team handle in `org/team` form, leading `@` stripped.
    Team(String),
    /// An email address requiring a lookup.
    Email(String),
    /// A username, leading `@` stripped.
    Username(String),
}

/// Classifies a raw owner token.
///
/// Checks are purely lexical and applied in priority order: a `/`
/// makes a team, an email-shaped token makes an email, anything else
/// is a username.
pub fn classify_token(token: &str) -> OwnerKind {
    if token.contains('/') {
        OwnerKind::Team(token.trim_start_matches('@').to_string())
    } else if EMAIL_REGEX.is_match(token) {
        OwnerKind::Email(token.to_string())
    } else {
        OwnerKind::Username(token.trim_start_matches('@').to_string())
    }
}

/// The resolved reviewer identities, split by kind.
///
/// Both lists are deduplicated preserving first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedReviewers {
    /// Resolved usernames, without the leading `@`.
    pub users: Vec<String>,
    /// Team handles in `org/team` form.
    pub teams: Vec<String>,
}

/// Resolves owner tokens against GitHub, sequentially.
pub struct Resolver<'a> {
    client: &'a dyn GithubClient,
    repository: &'a str,
    backoff: Duration,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver for the given client and `owner/repo`.
    pub fn new(client: &'a dyn GithubClient, repository: &'a str) -> Self {
        Self {
            client,
            repository,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Overrides the rate-limit backoff interval.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Resolves each token into a username or team handle.
    ///
    /// Never fails: tokens that cannot be resolved are dropped with a
    /// warning and the remaining tokens are still processed.
    pub async fn resolve(&self, tokens: &[String]) -> ResolvedReviewers {
        let mut resolved = ResolvedReviewers::default();

        for token in tokens {
            match classify_token(token) {
                OwnerKind::Team(handle) => {
                    if !resolved.teams.contains(&handle) {
                        resolved.teams.push(handle);
                    }
                }
                OwnerKind::Username(name) => {
                    if !resolved.users.contains(&name) {
                        resolved.users.push(name);
                    }
                }
                OwnerKind::Email(email) => {
                    if let Some(login) = self.resolve_email(&email).await {
                        if !resolved.users.contains(&login) {
                            resolved.users.push(login);
                        }
                    }
                }
            }
        }

        resolved
    }

    /// Resolves an email to a username.
    ///
    /// Tries the account-by-email search first, retrying on rate limits
    /// with a fixed backoff, then falls back to searching the target
    /// repository's commit history for the author email.
    async fn resolve_email(&self, email: &str) -> Option<String> {
        for attempt in 1..=MAX_SEARCH_ATTEMPTS {
            match self.client.find_user_by_email(email).await {
                Ok(Some(login)) => {
                    info!("resolved {} -> @{}", email, login);
                    return Some(login);
                }
                Ok(None) => {
                    debug!("no account found with email {}", email);
                    break;
                }
                Err(GithubClientError::RateLimitExceeded) => {
                    if attempt == MAX_SEARCH_ATTEMPTS {
                        warn!(
                            "rate limited searching for {}; retry budget exhausted",
                            email
                        );
                    } else {
                        info!(
                            "rate limited searching for {}; waiting {}s before retry",
                            email,
                            self.backoff.as_secs()
                        );
                        tokio::time::sleep(self.backoff).await;
                    }
                }
                Err(e) => {
                    warn!("user search for {} failed: {}", email, e);
                    break;
                }
            }
        }

        match self.client.find_commit_author(self.repository, email).await {
            Ok(Some(login)) => {
                info!("resolved {} -> @{} (via commits)", email, login);
                Some(login)
            }
            Ok(None) => {
                warn!("could not resolve email: {}", email);
                None
            }
            Err(e) => {
                warn!("commit search for {} failed: {}", email, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A mock GitHub client for resolver tests.
    #[derive(Default)]
    struct MockGithubClient {
        users_by_email: HashMap<String, String>,
        commit_authors: HashMap<String, String>,
        /// Number of leading user searches that report a rate limit.
        rate_limited_searches: usize,
        /// When set, every user search fails with this flag's error.
        search_fails: bool,
        user_search_calls: AtomicUsize,
        commit_search_calls: AtomicUsize,
    }

    impl MockGithubClient {
        fn new() -> Self {
            Self::default()
        }

        fn with_user(mut self, email: &str, login: &str) -> Self {
            self.users_by_email
                .insert(email.to_string(), login.to_string());
            self
        }

        fn with_commit_author(mut self, email: &str, login: &str) -> Self {
            self.commit_authors
                .insert(email.to_string(), login.to_string());
            self
        }

        fn with_rate_limited_searches(mut self, count: usize) -> Self {
            self.rate_limited_searches = count;
            self
        }

        fn with_failing_search(mut self) -> Self {
            self.search_fails = true;
            self
        }

        fn user_search_count(&self) -> usize {
            self.user_search_calls.load(Ordering::SeqCst)
        }

        fn commit_search_count(&self) -> usize {
            self.commit_search_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GithubClient for MockGithubClient {
        async fn find_user_by_email(
            &self,
            email: &str,
        ) -> Result<Option<String>, GithubClientError> {
            let call = self.user_search_calls.fetch_add(1, Ordering::SeqCst);
            if call < self.rate_limited_searches {
                return Err(GithubClientError::RateLimitExceeded);
            }
            if self.search_fails {
                return Err(GithubClientError::ApiError("search unavailable".into()));
            }
            Ok(self.users_by_email.get(email).cloned())
        }

        async fn find_commit_author(
            &self,
            _repo: &str,
            email: &str,
        ) -> Result<Option<String>, GithubClientError> {
            self.commit_search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.commit_authors.get(email).cloned())
        }

        async fn list_changed_files(
            &self,
            _repo: &str,
            _number: u64,
        ) -> Result<Vec<String>, GithubClientError> {
            unreachable!("resolver never lists files")
        }

        async fn request_reviewers(
            &self,
            _repo: &str,
            _number: u64,
            _reviewers: &[String],
            _team_reviewers: &[String],
        ) -> Result<(), GithubClientError> {
            unreachable!("resolver never requests reviews")
        }
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classify_priority_order() {
        assert_eq!(
            classify_token("@github/core"),
            OwnerKind::Team("github/core".to_string())
        );
        assert_eq!(
            classify_token("dev@example.com"),
            OwnerKind::Email("dev@example.com".to_string())
        );
        assert_eq!(
            classify_token("@alice"),
            OwnerKind::Username("alice".to_string())
        );
        assert_eq!(
            classify_token("alice"),
            OwnerKind::Username("alice".to_string())
        );
    }

    #[test]
    fn classify_slash_beats_email_shape() {
        // A '/' anywhere forces the team interpretation
        assert_eq!(
            classify_token("dev@example.com/x"),
            OwnerKind::Team("dev@example.com/x".to_string())
        );
    }

    #[test]
    fn classify_non_email_at_token() {
        // Not email-shaped, so treated as a username with '@' stripped
        assert_eq!(
            classify_token("@dev@example"),
            OwnerKind::Username("dev@example".to_string())
        );
    }

    #[tokio::test]
    async fn resolves_users_and_teams_lexically() {
        let client = MockGithubClient::new();
        let resolver = Resolver::new(&client, "org/repo");

        let resolved = resolver
            .resolve(&tokens(&["@alice", "bob", "@github/core"]))
            .await;
        assert_eq!(resolved.users, ["alice", "bob"]);
        assert_eq!(resolved.teams, ["github/core"]);
        assert_eq!(client.user_search_count(), 0);
    }

    #[tokio::test]
    async fn resolves_email_via_user_search() {
        let client = MockGithubClient::new().with_user("dev@example.com", "devlogin");
        let resolver = Resolver::new(&client, "org/repo");

        let resolved = resolver.resolve(&tokens(&["dev@example.com"])).await;
        assert_eq!(resolved.users, ["devlogin"]);
        assert_eq!(client.user_search_count(), 1);
        assert_eq!(client.commit_search_count(), 0);
    }

    #[tokio::test]
    async fn email_falls_back_to_commit_history() {
        let client = MockGithubClient::new().with_commit_author("dev@example.com", "committer");
        let resolver = Resolver::new(&client, "org/repo");

        let resolved = resolver.resolve(&tokens(&["dev@example.com"])).await;
        assert_eq!(resolved.users, ["committer"]);
        assert_eq!(client.user_search_count(), 1);
        assert_eq!(client.commit_search_count(), 1);
    }

    #[tokio::test]
    async fn unresolvable_email_is_dropped_not_fatal() {
        let client = MockGithubClient::new();
        let resolver = Resolver::new(&client, "org/repo");

        let resolved = resolver
            .resolve(&tokens(&["ghost@example.com", "@alice"]))
            .await;
        assert_eq!(resolved.users, ["alice"]);
        assert!(resolved.teams.is_empty());
    }

    #[tokio::test]
    async fn search_failure_falls_back_then_drops() {
        let client = MockGithubClient::new().with_failing_search();
        let resolver = Resolver::new(&client, "org/repo");

        let resolved = resolver.resolve(&tokens(&["dev@example.com"])).await;
        assert!(resolved.users.is_empty());
        // A non-rate-limit failure is not retried
        assert_eq!(client.user_search_count(), 1);
        assert_eq!(client.commit_search_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_retries_three_attempts_then_gives_up() {
        let client = MockGithubClient::new().with_rate_limited_searches(usize::MAX);
        let resolver = Resolver::new(&client, "org/repo");

        let resolved = resolver.resolve(&tokens(&["dev@example.com"])).await;
        assert!(resolved.users.is_empty());
        assert_eq!(client.user_search_count(), 3);
        // Exhausted retries still try the commit-history fallback
        assert_eq!(client.commit_search_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_then_success() {
        let client = MockGithubClient::new()
            .with_rate_limited_searches(1)
            .with_user("dev@example.com", "devlogin");
        let resolver = Resolver::new(&client, "org/repo");

        let resolved = resolver.resolve(&tokens(&["dev@example.com"])).await;
        assert_eq!(resolved.users, ["devlogin"]);
        assert_eq!(client.user_search_count(), 2);
        assert_eq!(client.commit_search_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_identities_collapse() {
        let client = MockGithubClient::new().with_user("dev@example.com", "alice");
        let resolver = Resolver::new(&client, "org/repo");

        let resolved = resolver
            .resolve(&tokens(&["@alice", "alice", "dev@example.com", "@org/t", "org/t"]))
            .await;
        assert_eq!(resolved.users, ["alice"]);
        assert_eq!(resolved.teams, ["org/t"]);
    }
}
