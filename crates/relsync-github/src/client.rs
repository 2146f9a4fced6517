//! GitHub issue search client

use crate::types::{GithubIssueRef, SearchIssuesPage};
use crate::{Error, Result};
use async_trait::async_trait;
use relsync_core::{GithubConfig, Repository};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use std::time::Duration;

/// Results requested per search page (the API maximum)
pub const SEARCH_PAGE_SIZE: usize = 100;

/// GitHub never returns more than this many hits for one search query
const SEARCH_RESULT_LIMIT: usize = 1000;

/// Lookup of the issues and pull requests attached to a milestone.
#[async_trait]
pub trait IssueSearch: Send + Sync {
    /// Every issue and pull request in `repository` whose milestone is
    /// `milestone`, in search order. Paginates until exhausted.
    async fn milestone_issues(
        &self,
        repository: &Repository,
        milestone: &str,
    ) -> Result<Vec<GithubIssueRef>>;
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("relsync/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|token| !token.is_empty()),
        })
    }

    /// Search qualifiers selecting a repository's milestone.
    ///
    /// Search syntax has no escape inside a quoted value, so `"` is dropped
    /// from the milestone name.
    pub fn milestone_query(repository: &Repository, milestone: &str) -> String {
        format!(
            "org:{} repo:{} milestone:\"{}\"",
            repository.owner,
            repository,
            milestone.replace('"', "")
        )
    }

    async fn search_page(&self, query: &str, page: usize) -> Result<SearchIssuesPage> {
        let url = format!("{}/search/issues", self.api_url);
        let page_size = SEARCH_PAGE_SIZE.to_string();
        let page_number = page.to_string();

        let mut request = self.client.get(&url).query(&[
            ("q", query),
            ("per_page", page_size.as_str()),
            ("page", page_number.as_str()),
        ]);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl IssueSearch for GithubClient {
    async fn milestone_issues(
        &self,
        repository: &Repository,
        milestone: &str,
    ) -> Result<Vec<GithubIssueRef>> {
        let query = Self::milestone_query(repository, milestone);
        let mut issues = Vec::new();
        let mut page = 1;

        loop {
            let result = self.search_page(&query, page).await?;
            let received = result.items.len();
            if result.incomplete_results {
                tracing::warn!("GitHub search for '{}' returned incomplete results", query);
            }
            issues.extend(result.items);

            tracing::debug!(
                page,
                received,
                total = result.total_count,
                "Fetched milestone search page"
            );

            if received < SEARCH_PAGE_SIZE
                || issues.len() as u64 >= result.total_count
                || issues.len() >= SEARCH_RESULT_LIMIT
            {
                break;
            }
            page += 1;
        }

        Ok(issues)
    }
}
