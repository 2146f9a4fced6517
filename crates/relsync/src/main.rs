//! Relsync
//!
//! Release step: close the Jira issues linked to a milestone's GitHub issues.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use relsync::{ActionsReporter, Args, Pacing, ReleaseReconciler, Reporter};
use relsync_github::GithubClient;
use relsync_jira::JiraClient;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(&args.log_level)
        .with_ansi(false) // CI log viewers show raw escape codes
        .with_target(false)
        .init();

    let reporter = ActionsReporter::new();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            reporter.fail(&format!("Invalid configuration: {}", e));
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::debug!("Resolved configuration: {:?}", config);

    let github = GithubClient::new(&config.github).context("Failed to create GitHub client")?;
    let jira = JiraClient::new(&config.jira).context("Failed to create Jira client")?;
    tracing::debug!("Jira base URL: {}", jira.base_url());

    let summary = ReleaseReconciler::new(&github, &jira, &reporter, &config.release)
        .with_pacing(Pacing::from_config(&config.pacing))
        .run()
        .await;

    tracing::info!(
        "Processed {} issue(s): {} transitioned, {} failed",
        summary.issues.len(),
        summary.transitioned(),
        summary.failed()
    );

    if reporter.has_failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
