//! Pipeline execution
//!
//! Runs the steps of one pipeline sequentially over the shared context. A
//! step starts only after the previous one resolved successfully; the first
//! error ends the run and is handed back exactly as the step produced it.

use super::table::{Pipeline, PipelineStep};
use crate::compose::CapabilitySet;
use crate::context::ExecutionContext;
use packwise_core::Result;
use tracing::Instrument;

/// What happened when the host fired an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The bound pipeline ran to completion
    Completed {
        /// Number of steps executed
        steps: usize,
    },
    /// The plugin has no binding for the event
    Unhandled,
}

/// Sequential pipeline runner
#[derive(Debug, Clone, Copy)]
pub struct HookRunner<'a> {
    capabilities: &'a CapabilitySet,
}

impl<'a> HookRunner<'a> {
    /// Create a runner dispatching to the given capabilities
    pub fn new(capabilities: &'a CapabilitySet) -> Self {
        Self { capabilities }
    }

    /// Run every step of `pipeline` in order
    pub async fn run(
        &self,
        event: &str,
        pipeline: &Pipeline,
        ctx: &mut ExecutionContext,
    ) -> Result<()> {
        tracing::debug!(hook = event, steps = pipeline.len(), "Running pipeline");

        for (index, step) in pipeline.steps().iter().enumerate() {
            let span = tracing::info_span!("pipeline_step", hook = event, step = %step, index);

            let start = std::time::Instant::now();
            let result = self.run_step(*step, ctx).instrument(span.clone()).await;
            let elapsed = start.elapsed();

            match result {
                Ok(()) => {
                    tracing::debug!(parent: &span, elapsed_ms = elapsed.as_millis(), "Step completed");
                }
                Err(e) => {
                    tracing::error!(parent: &span, elapsed_ms = elapsed.as_millis(), error = %e, "Step failed");
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    async fn run_step(&self, step: PipelineStep, ctx: &mut ExecutionContext) -> Result<()> {
        match step {
            PipelineStep::Call(operation) => self.capabilities.call(operation, ctx).await,
            PipelineStep::Reject(message) => Err(ctx.host().error(message)),
        }
    }
}
