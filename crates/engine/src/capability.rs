//! Capability module interface
//!
//! A capability module is an independently implemented unit (validation,
//! compilation, watching, ...) that provides one or more named asynchronous
//! operations. The engine only knows them through this trait.

use crate::context::ExecutionContext;
use async_trait::async_trait;
use packwise_core::{Operation, Result};

/// A module providing named asynchronous operations
///
/// Operations borrow the shared context mutably for their duration and may
/// read the host and options or leave results in the working state. A
/// failure is returned as-is to whoever invoked the pipeline, so modules
/// should build the exact error they want the host to see
/// (see [`packwise_core::Error::capability`]).
///
/// # Examples
///
/// ```ignore
/// struct Cleanup;
///
/// #[async_trait]
/// impl Capability for Cleanup {
///     fn name(&self) -> &str {
///         "cleanup"
///     }
///
///     fn operations(&self) -> &[Operation] {
///         &[Operation::Cleanup]
///     }
///
///     async fn call(&self, _op: Operation, ctx: &mut ExecutionContext) -> Result<()> {
///         ctx.state.output_path = None;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Capability: Send + Sync {
    /// Module name, used in logs and override reports
    fn name(&self) -> &str;

    /// Operations this module provides
    fn operations(&self) -> &[Operation];

    /// Run one of the provided operations
    ///
    /// Only called with an operation listed by [`Capability::operations`].
    async fn call(&self, operation: Operation, ctx: &mut ExecutionContext) -> Result<()>;
}
