//! Relsync Jira Integration
//!
//! Client library for finding Jira issues linked to GitHub issues and
//! transitioning them to "Done".

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use client::{JiraClient, JiraGateway};
pub use error::{Error, Result};
pub use types::*;
