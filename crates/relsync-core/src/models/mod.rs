pub mod config;
pub mod repository;
pub mod transition;

pub use config::{Config, GithubConfig, JiraConfig, PacingConfig, ReleaseConfig};
pub use repository::Repository;
pub use transition::TransitionMap;
