//! Review Assigner CLI
//!
//! A single-shot CI tool that assigns pull-request reviewers from a
//! REVIEWERS rule file.

use clap::Parser;
use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode as StdExitCode;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;
use cli::config::{ExitCode, ValidatedConfig, create_octocrab};
use cli::github::OctocrabClient;
use review_assigner_core::assign::{AssignOutcome, ReviewRequest};
use review_assigner_core::event::load_event;
use review_assigner_core::github::GithubClient;
use review_assigner_core::matching::candidate_owners;
use review_assigner_core::resolve::Resolver;
use review_assigner_core::rules::RuleSet;

#[tokio::main]
async fn main() -> StdExitCode {
    let args = Args::parse();

    init_tracing(args.verbose);

    let exit_code = run(args).await;
    StdExitCode::from(i32::from(exit_code) as u8)
}

/// Initialize tracing based on verbosity level.
///
/// Defaults to INFO so resolution progress lines reach the CI log; the
/// subscriber's log bridge also picks up the core library's records.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("octocrab=warn".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("reqwest=warn".parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// Run one assignment attempt with the given arguments.
async fn run(args: Args) -> ExitCode {
    let mut stderr = io::stderr().lock();
    let use_colors = io::stdout().is_terminal();

    // Validate configuration
    let config = match ValidatedConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    // Load the triggering event
    let event = match load_event(&config.event_path) {
        Ok(event) => event,
        Err(e) => {
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };

    let repo = &event.repository.full_name;
    let number = event.pull_request.number;
    let author = &event.pull_request.user.login;

    println!("Processing PR #{} in {}", number, repo);
    println!("PR author: {}", author);

    // Read and parse the rule file
    let rules_text = match std::fs::read_to_string(&config.rules_path) {
        Ok(text) => text,
        Err(e) => {
            write_error(
                &mut stderr,
                &format!(
                    "failed to read rule file '{}': {}",
                    config.rules_path.display(),
                    e
                ),
                use_colors,
            );
            return ExitCode::StartupFailure;
        }
    };
    let rules = RuleSet::parse(&rules_text);
    println!("Loaded {} reviewer rule(s)", rules.len());

    // Build the API client
    let octocrab = match create_octocrab(&config) {
        Ok(client) => client,
        Err(e) => {
            write_error(&mut stderr, &e.to_string(), use_colors);
            return ExitCode::StartupFailure;
        }
    };
    let client = OctocrabClient::new(octocrab);

    let changed_files = match client.list_changed_files(repo, number).await {
        Ok(files) => files,
        Err(e) => {
            write_error(
                &mut stderr,
                &format!("failed to list changed files: {}", e),
                use_colors,
            );
            return ExitCode::StartupFailure;
        }
    };
    debug!("changed files: {:?}", changed_files);
    println!("Changed files: {}", changed_files.join(", "));

    // Match changed files to owner tokens
    let candidates = candidate_owners(&rules, &changed_files);
    if candidates.is_empty() {
        println!("No reviewers matched for changed files");
        return ExitCode::Success;
    }
    println!("Matched reviewers: {}", candidates.join(", "));

    // Resolve tokens, drop the PR author, and submit
    let resolver = Resolver::new(&client, repo);
    let resolved = resolver.resolve(&candidates).await;
    let request = ReviewRequest::new(resolved, author);

    match request.submit(&client, repo, number).await {
        Ok(AssignOutcome::NothingToAssign) => {
            println!("No reviewers to assign");
            ExitCode::Success
        }
        Ok(AssignOutcome::Requested) => {
            let check = if use_colors {
                "✓".green().to_string()
            } else {
                "✓".to_string()
            };
            if !request.users.is_empty() {
                println!("{} Assigned reviewers: {}", check, request.users.join(", "));
            }
            if !request.teams.is_empty() {
                println!("{} Assigned teams: {}", check, request.teams.join(", "));
            }
            ExitCode::Success
        }
        Err(e) => {
            write_error(
                &mut stderr,
                &format!("failed to assign reviewers: {}", e),
                use_colors,
            );
            ExitCode::AssignmentFailed
        }
    }
}

/// Write an error message to the writer.
fn write_error<W: Write>(writer: &mut W, message: &str, use_colors: bool) {
    if use_colors {
        let _ = writeln!(writer, "{} {}", "Error:".bright_red().bold(), message);
    } else {
        let _ = writeln!(writer, "Error: {}", message);
    }
}
