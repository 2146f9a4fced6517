//! Error types for Jira integration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Connection failures, timeouts and other network-level errors
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid Jira credentials: {0}")]
    Credentials(#[from] reqwest::header::InvalidHeaderValue),

    #[error("JIRA API error: {status} {body}")]
    Api { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
