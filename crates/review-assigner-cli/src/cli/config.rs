//! Configuration handling for the CLI.
//!
//! This module validates CLI arguments into the configuration the run
//! needs and handles GitHub client construction.

use crate::cli::Args;
use octocrab::Octocrab;
use review_assigner_core::find_rules_file;
use secrecy::{ExposeSecret, SecretString};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration.
    #[error("missing required configuration: {0}")]
    MissingRequired(String),

    /// The rule file does not exist.
    #[error("rule file not found: {0}")]
    MissingRulesFile(String),

    /// GitHub client construction failed.
    #[error("GitHub authentication error: {0}")]
    GitHubAuth(String),
}

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Reviewers were assigned, or there was nothing to assign.
    Success = 0,
    /// Startup failed (missing credential, payload, or rule file).
    StartupFailure = 1,
    /// The review-request submission failed.
    AssignmentFailed = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

/// Validated configuration for one assignment run.
pub struct ValidatedConfig {
    /// The API credential.
    pub token: SecretString,
    /// Path to the rule file.
    pub rules_path: PathBuf,
    /// Path to the event payload.
    pub event_path: PathBuf,
    /// API base URL.
    pub base_url: String,
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let token = match &args.github_token {
            Some(token) if !token.trim().is_empty() => SecretString::from(token.clone()),
            _ => {
                return Err(ConfigError::MissingRequired(
                    "GITHUB_TOKEN is not set".to_string(),
                ));
            }
        };

        let event_path = args.event_path.clone().ok_or_else(|| {
            ConfigError::MissingRequired("GITHUB_EVENT_PATH is not set".to_string())
        })?;

        let rules_path = match &args.config {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::MissingRulesFile(path.display().to_string()));
                }
                path.clone()
            }
            None => find_rules_file(&args.repository_path).ok_or_else(|| {
                ConfigError::MissingRulesFile(format!(
                    "no REVIEWERS file found under '{}'. Searched in: REVIEWERS, .github/REVIEWERS, docs/REVIEWERS",
                    args.repository_path.display()
                ))
            })?,
        };

        Ok(Self {
            token,
            rules_path,
            event_path,
            base_url: args.github_base_url.clone(),
        })
    }
}

/// Creates an authenticated Octocrab client from the configuration.
pub fn create_octocrab(config: &ValidatedConfig) -> Result<Octocrab, ConfigError> {
    let mut builder = Octocrab::builder();

    if config.base_url != "https://api.github.com/" {
        builder = builder
            .base_uri(config.base_url.as_str())
            .map_err(|e| ConfigError::GitHubAuth(format!("invalid base URL: {}", e)))?;
    }

    builder
        .personal_token(config.token.expose_secret().to_string())
        .build()
        .map_err(|e| ConfigError::GitHubAuth(format!("failed to build client: {}", e)))
}
