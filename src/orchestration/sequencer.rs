//! Deploy sequencer - runs the two publish steps in strict order
//!
//! Step 1 publishes the documentation directory with replace semantics.
//! Step 2 publishes the README with append semantics, and only runs when
//! step 1 succeeded. Each step produces exactly one log line; a failure is
//! logged and stops the sequence, it is never rethrown.

use crate::core::config::DeployPlan;
use crate::core::error::DeployError;
use crate::core::state_machine::{DeploySequence, DeployState};
use crate::core::traits::{PagesPublisher, PublishRequest};
use std::time::Instant;

/// Fixed log line for a successful docs publish
pub const DOCS_SUCCESS_LOG: &str = "✅ Styleguide docs published";

/// Fixed log line for a successful README publish
pub const README_SUCCESS_LOG: &str = "✅ README published";

/// Prefix of the log line for a failed docs publish
pub const DOCS_FAILURE_PREFIX: &str = "❌ Styleguide docs publish failed";

/// Prefix of the log line for a failed README publish
pub const README_FAILURE_PREFIX: &str = "❌ README publish failed";

/// Outcome of a single publish step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: String,
    pub success: bool,
    pub log_line: String,
    pub error: Option<String>,
    pub files_published: usize,
    pub commit: Option<String>,
    pub skipped: bool,
    pub dry_run_files: Option<Vec<String>>,
}

/// Report returned after a deploy run
#[derive(Debug, Clone)]
pub struct DeployReport {
    pub success: bool,
    pub steps: Vec<StepOutcome>,
    pub log_lines: Vec<String>,
    pub duration_ms: u64,
    pub state: String,
}

/// Runs the two-step deploy sequence against a publisher
pub struct DeploySequencer {
    publisher: Box<dyn PagesPublisher>,
}

impl DeploySequencer {
    /// Create a sequencer driving the given publisher
    pub fn new(publisher: Box<dyn PagesPublisher>) -> Self {
        Self { publisher }
    }

    /// Execute the deploy plan.
    ///
    /// Publisher failures are captured in the report, not returned as
    /// `Err`; the error path of this function is reserved for sequencing
    /// bugs (invalid state transitions).
    pub async fn deploy(&self, plan: &DeployPlan) -> anyhow::Result<DeployReport> {
        let start_time = Instant::now();
        let mut sequence = DeploySequence::new();
        let mut steps = Vec::new();
        let mut log_lines = Vec::new();

        // Step 1: docs, replace semantics
        sequence.transition(DeployState::PublishingDocs, None)?;
        println!("📤 Publishing styleguide docs...");

        let docs = self
            .run_step(
                "docs",
                &plan.docs_request,
                DOCS_SUCCESS_LOG,
                DOCS_FAILURE_PREFIX,
            )
            .await;

        println!("  {}", docs.log_line);
        log_lines.push(docs.log_line.clone());
        let docs_failed = !docs.success;
        let docs_error = docs.error.clone();
        steps.push(docs);

        if docs_failed {
            // Log and stop: the README step must not run
            sequence.transition(DeployState::Failed, docs_error)?;
            return Ok(Self::report(false, steps, log_lines, &sequence, start_time));
        }

        // Step 2: README, append semantics
        sequence.transition(DeployState::PublishingReadme, None)?;
        println!("📤 Publishing README...");

        let readme = self
            .run_step(
                "readme",
                &plan.readme_request,
                README_SUCCESS_LOG,
                README_FAILURE_PREFIX,
            )
            .await;

        println!("  {}", readme.log_line);
        log_lines.push(readme.log_line.clone());
        let readme_failed = !readme.success;
        let readme_error = readme.error.clone();
        steps.push(readme);

        if readme_failed {
            sequence.transition(DeployState::Failed, readme_error)?;
            return Ok(Self::report(false, steps, log_lines, &sequence, start_time));
        }

        sequence.transition(DeployState::Success, None)?;
        Ok(Self::report(true, steps, log_lines, &sequence, start_time))
    }

    /// Run one publish step and fold its result into a `StepOutcome`
    async fn run_step(
        &self,
        step: &str,
        request: &PublishRequest,
        success_log: &str,
        failure_prefix: &str,
    ) -> StepOutcome {
        match self.publisher.publish(request).await {
            Ok(outcome) => {
                let log_line = if outcome.dry_run_files.is_some() {
                    format!(
                        "🧪 Dry-run: {} files matched for {}",
                        outcome.files_published, step
                    )
                } else {
                    success_log.to_string()
                };

                StepOutcome {
                    step: step.to_string(),
                    success: true,
                    log_line,
                    error: None,
                    files_published: outcome.files_published,
                    commit: outcome.commit,
                    skipped: outcome.skipped,
                    dry_run_files: outcome.dry_run_files,
                }
            }
            Err(e) => {
                let error = match step {
                    "docs" => DeployError::DocsPublishFailed {
                        message: e.to_string(),
                    },
                    _ => DeployError::ReadmePublishFailed {
                        message: e.to_string(),
                    },
                };

                StepOutcome {
                    step: step.to_string(),
                    success: false,
                    log_line: format!("{}: {}", failure_prefix, e),
                    error: Some(error.to_string()),
                    files_published: 0,
                    commit: None,
                    skipped: false,
                    dry_run_files: None,
                }
            }
        }
    }

    fn report(
        success: bool,
        steps: Vec<StepOutcome>,
        log_lines: Vec<String>,
        sequence: &DeploySequence,
        start_time: Instant,
    ) -> DeployReport {
        DeployReport {
            success,
            steps,
            log_lines,
            duration_ms: start_time.elapsed().as_millis() as u64,
            state: sequence.state().as_str().to_string(),
        }
    }
}
