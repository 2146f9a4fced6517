//! Run configuration

use super::{Repository, TransitionMap};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub jira: JiraConfig,
    pub release: ReleaseConfig,
    pub github: GithubConfig,
    pub pacing: PacingConfig,
}

#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JiraConfig {
    /// Bare host (`example.atlassian.net`) or a base URL with scheme
    pub host: String,
    pub username: String,
    pub password: String,
    pub jql_filter: String,
    /// Custom field holding the linked GitHub issue URL
    pub github_url_field_id: String,
    pub transitions: TransitionMap,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Milestone / release tag name
    pub name: String,
    pub repository: Repository,
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after each processed issue, in milliseconds
    pub issue_delay_ms: u64,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.jira.validate()?;
        self.release.validate()?;
        self.github.validate()?;
        Ok(())
    }
}

impl JiraConfig {
    /// Validate Jira configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("host", &self.host),
            ("username", &self.username),
            ("password", &self.password),
            ("JQL filter", &self.jql_filter),
            ("GitHub URL field id", &self.github_url_field_id),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("Jira {} cannot be empty", name)));
            }
        }

        self.transitions.validate()
    }

    /// Base URL for REST calls, with `https://` implied for a bare host
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("jql_filter", &self.jql_filter)
            .field("github_url_field_id", &self.github_url_field_id)
            .field("transitions", &self.transitions)
            .finish()
    }
}

impl ReleaseConfig {
    /// Validate release configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(
                "Release name cannot be empty".to_string(),
            ));
        }

        if self.repository.owner.trim().is_empty() || self.repository.repo.trim().is_empty() {
            return Err(Error::Validation(
                "Repository must be set as owner/repo".to_string(),
            ));
        }

        Ok(())
    }
}

impl GithubConfig {
    /// Validate GitHub configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::Validation(
                "GitHub API URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
        }
    }
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl PacingConfig {
    pub fn issue_delay(&self) -> Duration {
        Duration::from_millis(self.issue_delay_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            issue_delay_ms: 1000, // Jira rate limit
        }
    }
}
