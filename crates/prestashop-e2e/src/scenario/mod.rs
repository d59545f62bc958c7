// Scenario runner
//
// A scenario is an ordered list of steps run against one mutable context,
// followed by teardown steps. Every step is reported under an identifier for
// the reporting harness.
//
// After a failure the remaining steps are skipped (the default) or still run,
// depending on the `FailurePolicy`. Teardown steps always run.

use crate::error::{Error, Result};
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

pub mod assertions;
pub mod report;

pub use assertions::{ValueExpectation, expect_value};
pub use report::{
    FailureKind, ScenarioReport, StepOutcome, StepReport, Summary, TestContextItem,
};

/// What happens to the steps following a failed one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Mark every later step as skipped
    #[default]
    SkipRemaining,
    /// Run every later step anyway
    Continue,
}

type Action<C> = Box<dyn for<'a> FnOnce(&'a mut C) -> BoxFuture<'a, Result<()>> + Send>;

/// One named step of a scenario.
pub struct Step<C> {
    id: String,
    title: String,
    action: Action<C>,
}

impl<C> Step<C> {
    /// Creates a step. `id` is the identifier published to the reporting
    /// harness, `title` the human readable description.
    ///
    /// ```ignore
    /// Step::new("goToProductsPage", "should go to 'Catalog > Products' page", |ctx| {
    ///     Box::pin(async move { ctx.go_to_products().await })
    /// })
    /// ```
    pub fn new<F>(id: impl Into<String>, title: impl Into<String>, action: F) -> Self
    where
        F: for<'a> FnOnce(&'a mut C) -> BoxFuture<'a, Result<()>> + Send + 'static,
    {
        Self {
            id: id.into(),
            title: title.into(),
            action: Box::new(action),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl<C> fmt::Debug for Step<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish()
    }
}

/// An ordered list of steps plus teardown.
pub struct Scenario<C> {
    title: String,
    base_context: String,
    steps: Vec<Step<C>>,
    teardown: Vec<Step<C>>,
}

impl<C> fmt::Debug for Scenario<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("title", &self.title)
            .field("base_context", &self.base_context)
            .field("steps", &self.steps)
            .field("teardown", &self.teardown)
            .finish()
    }
}

impl<C: Send> Scenario<C> {
    pub fn new(title: impl Into<String>, base_context: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            base_context: base_context.into(),
            steps: Vec::new(),
            teardown: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn base_context(&self) -> &str {
        &self.base_context
    }

    /// Appends a step (builder form)
    pub fn step(mut self, step: Step<C>) -> Self {
        self.steps.push(step);
        self
    }

    /// Appends a step
    pub fn push(&mut self, step: Step<C>) {
        self.steps.push(step);
    }

    /// Appends several steps
    pub fn extend(&mut self, steps: impl IntoIterator<Item = Step<C>>) {
        self.steps.extend(steps);
    }

    /// Appends a teardown step
    pub fn teardown(mut self, step: Step<C>) -> Self {
        self.teardown.push(step);
        self
    }

    /// Identifiers of the steps, in run order (teardown excluded)
    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step in order against `ctx`, then the teardown steps.
    pub async fn run(self, ctx: &mut C, policy: FailurePolicy) -> ScenarioReport {
        let started = Instant::now();
        tracing::info!("Scenario '{}' ({})", self.title, self.base_context);

        let mut steps = Vec::with_capacity(self.steps.len());
        let mut failed = false;
        for step in self.steps {
            if failed && policy == FailurePolicy::SkipRemaining {
                tracing::info!("  - {} [skipped]", step.title);
                steps.push(StepReport {
                    title: step.title,
                    context: TestContextItem::test_identifier(step.id, &self.base_context),
                    outcome: StepOutcome::Skipped,
                    duration_ms: 0,
                });
                continue;
            }

            let report = run_step(step, ctx, &self.base_context).await;
            failed |= report.outcome.is_failed();
            steps.push(report);
        }

        let mut teardown = Vec::with_capacity(self.teardown.len());
        for step in self.teardown {
            teardown.push(run_step(step, ctx, &self.base_context).await);
        }

        ScenarioReport {
            title: self.title,
            base_context: self.base_context,
            policy,
            steps,
            teardown,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }
}

async fn run_step<C>(step: Step<C>, ctx: &mut C, base_context: &str) -> StepReport {
    let started = Instant::now();
    let result = (step.action)(ctx).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    let outcome = match result {
        Ok(()) => {
            tracing::info!("  ✓ {} ({}ms)", step.title, duration_ms);
            StepOutcome::Passed
        }
        Err(e) => {
            tracing::warn!("  ✗ {} [{}]: {}", step.title, step.id, e);
            StepOutcome::Failed {
                kind: classify(&e),
                message: e.to_string(),
            }
        }
    };

    StepReport {
        title: step.title,
        context: TestContextItem::test_identifier(step.id, base_context),
        outcome,
        duration_ms,
    }
}

fn classify(error: &Error) -> FailureKind {
    if error.is_assertion() {
        FailureKind::Assertion
    } else {
        FailureKind::Environment
    }
}
