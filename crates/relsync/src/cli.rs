//! Command-line and environment inputs
//!
//! Flags fall back to the `INPUT_*` variables GitHub Actions sets for step
//! inputs, so the binary runs unchanged as a workflow step. Actions sets
//! unprovided inputs to an empty string, so empty values count as unset.

use std::path::PathBuf;

use clap::Parser;
use relsync_core::{storage::ConfigStorage, Config, Repository, TransitionMap};

#[derive(Parser, Debug, Default)]
#[command(name = "relsync")]
#[command(
    about = "Close Jira issues linked to the GitHub issues of a release milestone",
    long_about = None
)]
pub struct Args {
    /// JSON config file; flags and environment override its values
    #[arg(short, long, env = "RELSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Jira host, e.g. example.atlassian.net
    #[arg(long, env = "INPUT_JIRA_HOST")]
    pub jira_host: Option<String>,

    #[arg(long, env = "INPUT_JIRA_USERNAME")]
    pub jira_username: Option<String>,

    #[arg(long, env = "INPUT_JIRA_PASSWORD", hide_env_values = true)]
    pub jira_password: Option<String>,

    /// JQL fragment every search is restricted to
    #[arg(long, env = "INPUT_JIRA_JQL_FILTER")]
    pub jira_jql_filter: Option<String>,

    /// Jira field holding the GitHub issue URL
    #[arg(long, env = "INPUT_JIRA_GITHUB_URL_FIELD_ID")]
    pub jira_github_url_field_id: Option<String>,

    /// Transition id for projects without a mapping
    #[arg(long, env = "INPUT_JIRA_CLOSED_ID")]
    pub jira_closed_id: Option<String>,

    /// Per-project transition ids, e.g. FRB=51,OPS=31
    #[arg(long, env = "INPUT_JIRA_TRANSITIONS")]
    pub jira_transitions: Option<String>,

    /// Milestone / release tag to process
    #[arg(long, env = "INPUT_GITHUB_RELEASE_NAME")]
    pub github_release_name: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,

    /// Pause after each issue, in milliseconds
    #[arg(long, env = "INPUT_ISSUE_DELAY_MS")]
    pub issue_delay_ms: Option<String>,

    /// Log level or tracing filter directives
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Resolve the run configuration: defaults, then the config file, then
    /// flags and environment. The result is validated.
    pub fn resolve_config(&self) -> relsync_core::Result<Config> {
        let mut config = match &self.config {
            Some(path) => ConfigStorage::new(path).load()?,
            None => Config::default(),
        };

        let jira = &mut config.jira;
        override_with(&mut jira.host, &self.jira_host);
        override_with(&mut jira.username, &self.jira_username);
        override_with(&mut jira.password, &self.jira_password);
        override_with(&mut jira.jql_filter, &self.jira_jql_filter);
        override_with(&mut jira.github_url_field_id, &self.jira_github_url_field_id);

        if let Some(default_id) = non_empty(&self.jira_closed_id) {
            jira.transitions.default_id = default_id
                .trim()
                .parse()
                .map_err(|_| relsync_core::Error::InvalidTransition(default_id.to_string()))?;
        }
        if let Some(spec) = non_empty(&self.jira_transitions) {
            apply_transitions(&mut jira.transitions, spec)?;
        }

        override_with(&mut config.release.name, &self.github_release_name);
        if let Some(repository) = non_empty(&self.repository) {
            config.release.repository = Repository::parse(repository)?;
        }

        if let Some(token) = non_empty(&self.github_token) {
            config.github.token = Some(token.to_string());
        }
        override_with(&mut config.github.api_url, &self.github_api_url);

        if let Some(delay) = non_empty(&self.issue_delay_ms) {
            config.pacing.issue_delay_ms = delay.trim().parse().map_err(|_| {
                relsync_core::Error::Validation(format!("Invalid issue delay '{}'", delay))
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

fn override_with(target: &mut String, value: &Option<String>) {
    if let Some(value) = non_empty(value) {
        *target = value.to_string();
    }
}

fn apply_transitions(map: &mut TransitionMap, spec: &str) -> relsync_core::Result<()> {
    for (key, id) in TransitionMap::parse_overrides(spec)? {
        map.insert(key, id);
    }
    Ok(())
}
