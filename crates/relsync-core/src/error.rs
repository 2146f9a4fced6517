//! Error types for configuration handling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid repository '{0}', expected owner/repo")]
    InvalidRepository(String),

    #[error("Invalid transition mapping '{0}', expected KEY=ID")]
    InvalidTransition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
