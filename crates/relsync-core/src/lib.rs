pub mod error;
pub mod models;
pub mod storage;

pub use error::{Error, Result};
pub use models::{
    Config, GithubConfig, JiraConfig, PacingConfig, ReleaseConfig, Repository, TransitionMap,
};
