//! GitHub search API types

use serde::{Deserialize, Serialize};

/// The parts of a search hit the reconciler uses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GithubIssueRef {
    pub html_url: String,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub title: String,
}

impl GithubIssueRef {
    pub fn new(html_url: impl Into<String>) -> Self {
        Self {
            html_url: html_url.into(),
            number: 0,
            title: String::new(),
        }
    }
}

/// One page of `GET /search/issues`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchIssuesPage {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<GithubIssueRef>,
}
