//! Jira REST client

use crate::auth::JiraAuth;
use crate::types::{JiraIssue, SearchResponse, TransitionRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use relsync_core::{JiraConfig, TransitionMap};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use std::time::Duration;

/// Operations the release reconciler needs from Jira.
#[async_trait]
pub trait JiraGateway: Send + Sync {
    /// Find Jira issues whose GitHub URL field equals `issue_url`.
    async fn search_linked_issue(&self, issue_url: &str) -> Result<Vec<JiraIssue>>;

    /// Move `issue` to its project's "Done" transition with `comment` attached.
    async fn transition(&self, issue: &JiraIssue, comment: &str) -> Result<()>;
}

pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    auth: JiraAuth,
    jql_filter: String,
    github_url_field_id: String,
    transitions: TransitionMap,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            auth: JiraAuth::from_config(config)?,
            jql_filter: config.jql_filter.clone(),
            github_url_field_id: config.github_url_field_id.clone(),
            transitions: config.transitions.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// JQL matching issues linked to `issue_url`, e.g.
    /// `project = TEST AND "Issue Link[URL Field]" = "https://github.com/o/r/issues/1"`
    pub fn linked_issue_jql(&self, issue_url: &str) -> String {
        format!(
            "{} AND {} = {}",
            self.jql_filter,
            quote_jql(&self.github_url_field_id),
            quote_jql(issue_url)
        )
    }

    pub fn search_url(&self, issue_url: &str) -> String {
        format!(
            "{}/rest/api/3/search/jql?jql={}&fields=project",
            self.base_url,
            urlencoding::encode(&self.linked_issue_jql(issue_url))
        )
    }

    pub fn transition_url(&self, issue: &JiraIssue) -> String {
        format!("{}/rest/api/2/issue/{}/transitions", self.base_url, issue.id)
    }

    pub fn resolve_transition_id(&self, project_key: &str) -> u32 {
        self.transitions.resolve(project_key)
    }

    /// Send with auth and JSON headers. `None` means the server answered
    /// without content (204 or an empty body).
    async fn send(&self, request: RequestBuilder) -> Result<Option<String>> {
        let response = request
            .header(AUTHORIZATION, self.auth.header_value())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(body))
        }
    }
}

#[async_trait]
impl JiraGateway for JiraClient {
    async fn search_linked_issue(&self, issue_url: &str) -> Result<Vec<JiraIssue>> {
        tracing::info!("Searching for jira issues linked to {}", issue_url);

        let body = self.send(self.client.get(self.search_url(issue_url))).await?;
        match body {
            Some(body) => {
                let response: SearchResponse = serde_json::from_str(&body)?;
                Ok(response.issues)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn transition(&self, issue: &JiraIssue, comment: &str) -> Result<()> {
        let transition_id = self.resolve_transition_id(&issue.fields.project.key);
        tracing::info!(
            "Transitioning jira task {} to status {}.",
            issue.key,
            transition_id
        );

        let body = serde_json::to_string(&TransitionRequest::done(transition_id, comment))?;
        self.send(self.client.post(self.transition_url(issue)).body(body))
            .await?;
        Ok(())
    }
}

/// Quote a value as a JQL string literal.
fn quote_jql(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{JiraFields, JiraProject};
    use wiremock::matchers::{body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ISSUE_URL: &str = "https://github.com/owner/repo/issues/1";

    fn config(host: &str) -> JiraConfig {
        JiraConfig {
            host: host.to_string(),
            username: "test@example.com".to_string(),
            password: "password123".to_string(),
            jql_filter: "project = TEST".to_string(),
            github_url_field_id: "Issue Link[URL Field]".to_string(),
            transitions: TransitionMap::default(),
        }
    }

    fn issue(project: &str) -> JiraIssue {
        JiraIssue {
            id: "12345".to_string(),
            key: format!("{}-1", project),
            fields: JiraFields {
                project: JiraProject {
                    key: project.to_string(),
                },
            },
        }
    }

    #[test]
    fn test_search_url_encoding() {
        let client = JiraClient::new(&config("test.atlassian.net")).unwrap();
        assert_eq!(
            client.search_url(ISSUE_URL),
            "https://test.atlassian.net/rest/api/3/search/jql?jql=project%20%3D%20TEST%20AND%20%22Issue%20Link%5BURL%20Field%5D%22%20%3D%20%22https%3A%2F%2Fgithub.com%2Fowner%2Frepo%2Fissues%2F1%22&fields=project"
        );
    }

    #[test]
    fn test_quote_jql_escapes() {
        assert_eq!(quote_jql(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn test_resolve_transition_id() {
        let client = JiraClient::new(&config("test.atlassian.net")).unwrap();
        assert_eq!(client.resolve_transition_id("FRB"), 51);
        assert_eq!(client.resolve_transition_id("TEST"), 5);
        assert_eq!(client.resolve_transition_id("FRB2"), 5);
    }

    #[tokio::test]
    async fn test_search_linked_issue() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/search/jql"))
            .and(query_param(
                "jql",
                r#"project = TEST AND "Issue Link[URL Field]" = "https://github.com/owner/repo/issues/1""#,
            ))
            .and(query_param("fields", "project"))
            .and(header(
                "authorization",
                "Basic dGVzdEBleGFtcGxlLmNvbTpwYXNzd29yZDEyMw==",
            ))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "issues": [
                    {"id": "10001", "key": "TEST-1", "fields": {"project": {"key": "TEST"}}},
                    {"id": "10002", "key": "TEST-2", "fields": {"project": {"key": "TEST"}}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&config(&server.uri())).unwrap();
        let issues = client.search_linked_issue(ISSUE_URL).await.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].key, "TEST-1");
        assert_eq!(issues[1].id, "10002");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            requests[0].url.query(),
            Some("jql=project%20%3D%20TEST%20AND%20%22Issue%20Link%5BURL%20Field%5D%22%20%3D%20%22https%3A%2F%2Fgithub.com%2Fowner%2Frepo%2Fissues%2F1%22&fields=project")
        );
    }

    #[tokio::test]
    async fn test_search_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/search/jql"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = JiraClient::new(&config(&server.uri())).unwrap();
        let issues = client.search_linked_issue(ISSUE_URL).await.unwrap();
        assert!(issues.is_empty());
    }

    #[tokio::test]
    async fn test_search_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/api/3/search/jql"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Field does not exist"))
            .mount(&server)
            .await;

        let client = JiraClient::new(&config(&server.uri())).unwrap();
        let err = client.search_linked_issue(ISSUE_URL).await.unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, "Field does not exist");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_transport_error() {
        let client = JiraClient::new(&config("http://127.0.0.1:1")).unwrap();
        let err = client.search_linked_issue(ISSUE_URL).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_transition_frb_uses_51() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/12345/transitions"))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .and(body_string_contains(r#""id":"51""#))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&config(&server.uri())).unwrap();
        client.transition(&issue("FRB"), "Test comment").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "update": {"comment": [{"add": {"body": "Test comment"}}]},
                "transition": {"id": "51"},
                "fields": {"resolution": {"name": "Done"}}
            })
        );
    }

    #[tokio::test]
    async fn test_transition_other_project_uses_5() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/12345/transitions"))
            .and(body_string_contains(r#""id":"5""#))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = JiraClient::new(&config(&server.uri())).unwrap();
        client.transition(&issue("TEST"), "Test comment").await.unwrap();
    }

    #[tokio::test]
    async fn test_transition_configured_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/12345/transitions"))
            .and(body_string_contains(r#""id":"31""#))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = config(&server.uri());
        config.transitions.insert("OPS", 31);
        let client = JiraClient::new(&config).unwrap();
        client.transition(&issue("OPS"), "Test comment").await.unwrap();
    }

    #[tokio::test]
    async fn test_transition_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/2/issue/12345/transitions"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"errorMessages":["Transition id '5' is not valid"]}"#),
            )
            .mount(&server)
            .await;

        let client = JiraClient::new(&config(&server.uri())).unwrap();
        let err = client
            .transition(&issue("TEST"), "Test comment")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api { status: 400, .. }));
        assert!(err.to_string().contains("is not valid"));
    }

    #[tokio::test]
    async fn test_transition_transport_error() {
        let client = JiraClient::new(&config("http://127.0.0.1:1")).unwrap();
        let err = client
            .transition(&issue("TEST"), "Test comment")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
