//! Jira authentication

use crate::Result;
use base64::Engine;
use relsync_core::JiraConfig;
use reqwest::header::HeaderValue;
use std::fmt;

/// Basic credentials for the Jira REST API, encoded once into the
/// `Authorization` header value and marked sensitive so it stays out of
/// request logging.
#[derive(Clone)]
pub struct JiraAuth {
    username: String,
    header: HeaderValue,
}

impl JiraAuth {
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", config.username, config.password));
        let mut header = HeaderValue::from_str(&format!("Basic {}", encoded))?;
        header.set_sensitive(true);

        Ok(Self {
            username: config.username.clone(),
            header,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn header_value(&self) -> HeaderValue {
        self.header.clone()
    }
}

impl fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraAuth")
            .field("username", &self.username)
            .field("header", &"<redacted>")
            .finish()
    }
}
