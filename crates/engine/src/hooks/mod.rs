//! Lifecycle hook binding
//!
//! Maps host lifecycle event names to pipelines of capability operations and
//! runs them.
//!
//! ## Execution Model
//!
//! - Each event is bound to exactly one pipeline, fixed at construction
//! - Steps run strictly one after another, each awaited before the next starts
//! - The first failing step aborts the pipeline and its error is returned unchanged
//! - All pipelines share one execution context, so state left by one pipeline
//!   is visible to the next
//!
//! ## Module Organization
//!
//! - `table`: event names, pipeline steps and the binding table
//! - `runner`: sequential pipeline execution

pub mod runner;
pub mod table;

// Re-export main types for convenience
pub use runner::{HookOutcome, HookRunner};
pub use table::{HookTable, INVOKE_DISABLED_MESSAGE, Pipeline, PipelineStep, events};
