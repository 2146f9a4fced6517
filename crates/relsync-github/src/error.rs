//! Error types for the GitHub client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GitHub API error: {status} {body}")]
    Api { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, Error>;
