//! Release reconciliation
//!
//! Walks every GitHub issue in a release milestone, finds the Jira issue
//! linked to it and transitions that issue to "Done". Issues are handled one
//! at a time; a failure on one issue is reported and the run moves on.

use relsync_core::ReleaseConfig;
use relsync_github::IssueSearch;
use relsync_jira::{JiraGateway, JiraIssue};

use crate::pacing::Pacing;
use crate::report::Reporter;

/// Errors that end a run before any issue is processed
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Error retrieving release by tag {release} {source}")]
    Release {
        release: String,
        source: relsync_github::Error,
    },
}

/// Terminal state of one GitHub issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    NotFound,
    SearchFailed,
    Transitioned { key: String },
    TransitionFailed { key: String },
}

impl IssueOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            IssueOutcome::SearchFailed | IssueOutcome::TransitionFailed { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    pub url: String,
    pub outcome: IssueOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub issues: Vec<IssueReport>,
    /// Set when the milestone could not be fetched
    pub fatal: bool,
}

impl RunSummary {
    fn fatal() -> Self {
        Self {
            issues: Vec::new(),
            fatal: true,
        }
    }

    pub fn transitioned(&self) -> usize {
        self.issues
            .iter()
            .filter(|report| matches!(report.outcome, IssueOutcome::Transitioned { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.issues
            .iter()
            .filter(|report| report.outcome.is_failure())
            .count()
    }
}

/// Comment attached to the Jira issue when it is closed
pub fn comment_body(release: &ReleaseConfig) -> String {
    format!(
        "(Automated Message) The GitHub issue linked to this Jira has been resolved in [{}|{}] of {}. 🎉",
        release.name,
        release.repository.release_url(&release.name),
        release.repository.repo
    )
}

pub struct ReleaseReconciler<'a> {
    github: &'a dyn IssueSearch,
    jira: &'a dyn JiraGateway,
    reporter: &'a dyn Reporter,
    release: &'a ReleaseConfig,
    pacing: Pacing,
}

impl<'a> ReleaseReconciler<'a> {
    pub fn new(
        github: &'a dyn IssueSearch,
        jira: &'a dyn JiraGateway,
        reporter: &'a dyn Reporter,
        release: &'a ReleaseConfig,
    ) -> Self {
        Self {
            github,
            jira,
            reporter,
            release,
            pacing: Pacing::default(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run one reconciliation pass. Never returns an error: a fatal failure
    /// is sent to the reporter and flagged on the summary.
    pub async fn run(&self) -> RunSummary {
        match self.reconcile().await {
            Ok(summary) => summary,
            Err(e) => {
                self.reporter.fail(&e.to_string());
                RunSummary::fatal()
            }
        }
    }

    async fn reconcile(&self) -> Result<RunSummary, ReconcileError> {
        let repository = &self.release.repository;
        self.reporter.info(&format!(
            "Starting job for {} {}.",
            repository.owner, repository.repo
        ));

        let issues = self
            .github
            .milestone_issues(repository, &self.release.name)
            .await
            .map_err(|source| ReconcileError::Release {
                release: self.release.name.clone(),
                source,
            })?;

        self.reporter.info(&format!(
            "Found {} issue(s) in release {}",
            issues.len(),
            self.release.name
        ));

        let mut summary = RunSummary::default();
        for issue in &issues {
            let outcome = self.reconcile_issue(&issue.html_url).await;
            summary.issues.push(IssueReport {
                url: issue.html_url.clone(),
                outcome,
            });

            self.pacing.wait().await;
        }

        tracing::debug!(
            processed = summary.issues.len(),
            transitioned = summary.transitioned(),
            failed = summary.failed(),
            "Reconciliation finished"
        );

        Ok(summary)
    }

    async fn reconcile_issue(&self, issue_url: &str) -> IssueOutcome {
        let jira_issue = match self.find_linked(issue_url).await {
            Ok(Some(issue)) => issue,
            Ok(None) => {
                self.reporter.info(&format!("No Jira found for {}", issue_url));
                return IssueOutcome::NotFound;
            }
            Err(e) => {
                self.reporter
                    .fail(&format!("Error searching jira tasks: {}", e));
                return IssueOutcome::SearchFailed;
            }
        };

        self.reporter
            .info(&format!("Jira {} found for {}", jira_issue.key, issue_url));

        let comment = comment_body(self.release);
        match self.jira.transition(&jira_issue, &comment).await {
            Ok(()) => IssueOutcome::Transitioned {
                key: jira_issue.key,
            },
            Err(e) => {
                self.reporter.fail(&format!(
                    "Error transitioning jira task {} {}",
                    jira_issue.id, e
                ));
                IssueOutcome::TransitionFailed {
                    key: jira_issue.key,
                }
            }
        }
    }

    /// First match wins when several Jira issues link the same URL.
    async fn find_linked(&self, issue_url: &str) -> relsync_jira::Result<Option<JiraIssue>> {
        let found = self.jira.search_linked_issue(issue_url).await?;
        if found.len() > 1 {
            tracing::warn!(
                "{} Jira issues link {}, using {}",
                found.len(),
                issue_url,
                found[0].key
            );
        }
        Ok(found.into_iter().next())
    }
}
