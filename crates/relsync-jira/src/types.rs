//! Jira API types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraIssue {
    /// Server-internal id, used to address transitions
    pub id: String,
    /// Human-readable key such as `PROJ-123`
    pub key: String,
    pub fields: JiraFields,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraFields {
    pub project: JiraProject,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JiraProject {
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}

/// Body of `POST /rest/api/2/issue/{id}/transitions`
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    pub update: TransitionUpdate,
    pub transition: TransitionTarget,
    pub fields: TransitionFields,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionUpdate {
    pub comment: Vec<CommentOperation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentOperation {
    pub add: CommentBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentBody {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionTarget {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionFields {
    pub resolution: Resolution,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub name: String,
}

impl TransitionRequest {
    /// Move to `transition_id`, resolve as "Done" and attach `comment`.
    pub fn done(transition_id: u32, comment: impl Into<String>) -> Self {
        Self {
            update: TransitionUpdate {
                comment: vec![CommentOperation {
                    add: CommentBody {
                        body: comment.into(),
                    },
                }],
            },
            transition: TransitionTarget {
                id: transition_id.to_string(),
            },
            fields: TransitionFields {
                resolution: Resolution {
                    name: "Done".to_string(),
                },
            },
        }
    }
}
