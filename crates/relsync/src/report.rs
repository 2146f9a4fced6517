//! Run reporting sink

use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Where the reconciler sends progress and failure messages.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);

    /// Record a failure. The run may continue; the process exits unsuccessfully.
    fn fail(&self, message: &str);
}

/// Reporter for GitHub Actions steps. Progress goes through `tracing`;
/// each failure is written once, as an `::error::` workflow command, so it
/// is annotated on the run.
pub struct ActionsReporter {
    failed: AtomicBool,
    output: Mutex<Box<dyn Write + Send>>,
}

impl ActionsReporter {
    pub fn new() -> Self {
        Self::with_output(Box::new(std::io::stdout()))
    }

    /// Write workflow commands somewhere other than stdout
    pub fn with_output(output: Box<dyn Write + Send>) -> Self {
        Self {
            failed: AtomicBool::new(false),
            output: Mutex::new(output),
        }
    }

    pub fn has_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

impl Reporter for ActionsReporter {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn fail(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        let mut output = match self.output.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(output, "::error::{}", escape_workflow_data(message)) {
            tracing::warn!("Failed to write workflow command: {}", e);
        }
    }
}

impl Default for ActionsReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActionsReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionsReporter")
            .field("failed", &self.has_failed())
            .finish_non_exhaustive()
    }
}

/// Workflow command data must not contain raw `%`, CR or LF.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
