//! Relsync GitHub Client
//!
//! Searches the GitHub issue index for everything attached to a milestone.

pub mod client;
pub mod error;
pub mod types;

pub use client::{GithubClient, IssueSearch};
pub use error::{Error, Result};
pub use types::{GithubIssueRef, SearchIssuesPage};
