// Scenario reports

use crate::scenario::FailurePolicy;
use serde::{Deserialize, Serialize};

/// Key under which step identifiers are published to the reporting harness
pub const TEST_IDENTIFIER_KEY: &str = "testIdentifier";

/// Correlation data attached to every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestContextItem {
    pub key: String,
    pub value: String,
    pub base_context: String,
}

impl TestContextItem {
    pub fn test_identifier(value: impl Into<String>, base_context: impl Into<String>) -> Self {
        Self {
            key: TEST_IDENTIFIER_KEY.to_string(),
            value: value.into(),
            base_context: base_context.into(),
        }
    }
}

/// Why a step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A value read from the shop did not match the expected one
    Assertion,
    /// The step could not complete (missing element, timeout, closed tab...)
    Environment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Passed,
    Failed { kind: FailureKind, message: String },
    Skipped,
}

impl StepOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub title: String,
    pub context: TestContextItem,
    pub outcome: StepOutcome,
    pub duration_ms: u64,
}

/// Outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub title: String,
    pub base_context: String,
    pub policy: FailurePolicy,
    pub steps: Vec<StepReport>,
    pub teardown: Vec<StepReport>,
    pub duration_ms: u64,
}

/// Step counts of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ScenarioReport {
    /// True when no step, teardown included, failed.
    pub fn is_success(&self) -> bool {
        self.all_steps().all(|step| !step.outcome.is_failed())
    }

    pub fn summary(&self) -> Summary {
        self.all_steps()
            .fold(Summary::default(), |mut summary, step| {
                match step.outcome {
                    StepOutcome::Passed => summary.passed += 1,
                    StepOutcome::Failed { .. } => summary.failed += 1,
                    StepOutcome::Skipped => summary.skipped += 1,
                }
                summary
            })
    }

    /// Report of the step with identifier `id`
    pub fn step(&self, id: &str) -> Option<&StepReport> {
        self.all_steps().find(|step| step.context.value == id)
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepReport> {
        self.all_steps().filter(|step| step.outcome.is_failed())
    }

    fn all_steps(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().chain(self.teardown.iter())
    }
}
