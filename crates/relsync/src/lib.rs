//! Relsync
//!
//! Transitions the Jira issues linked to a release milestone's GitHub issues.
//! Exposed as a library for testing.

pub mod cli;
pub mod pacing;
pub mod reconciler;
pub mod report;

pub use cli::Args;
pub use pacing::Pacing;
pub use reconciler::{IssueOutcome, IssueReport, ReconcileError, ReleaseReconciler, RunSummary};
pub use report::{ActionsReporter, Reporter};
