//! Dry-run capability modules
//!
//! Stand-ins for the real bundler integration. Each module logs the
//! operations it is asked to perform and appends them to the working state
//! under [`TRACE_KEY`], so a command can be followed end to end without a
//! bundler installed. The few fields later steps depend on (output path,
//! absolute event path) are filled in the way the real modules would.

use async_trait::async_trait;
use packwise_core::{Operation, Result};
use packwise_engine::{Capability, ExecutionContext, WorkingState};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Attachment holding the operations called so far, in order
pub const TRACE_KEY: &str = "dryRun";

/// Attachment set by `makePathOptionAbsolute`
pub const ABSOLUTE_PATH_KEY: &str = "absolutePath";

/// Output directory used when `--out` is not given
pub const DEFAULT_OUTPUT_DIR: &str = ".webpack";

/// A capability module that only traces its operations
#[derive(Debug, Clone)]
pub struct DryRun {
    name: &'static str,
    operations: Vec<Operation>,
}

impl DryRun {
    /// Create a module providing `operations`
    pub fn new(name: &'static str, operations: &[Operation]) -> Self {
        Self {
            name,
            operations: operations.to_vec(),
        }
    }
}

#[async_trait]
impl Capability for DryRun {
    fn name(&self) -> &str {
        self.name
    }

    fn operations(&self) -> &[Operation] {
        &self.operations
    }

    async fn call(&self, operation: Operation, ctx: &mut ExecutionContext) -> Result<()> {
        tracing::info!(module = self.name, %operation, "Dry run");

        match operation {
            Operation::Compile => {
                let output = match ctx.options().get_str("out") {
                    Some(out) => PathBuf::from(out),
                    None => service_dir(ctx).join(DEFAULT_OUTPUT_DIR),
                };
                tracing::debug!(output = %output.display(), "Would compile");
                ctx.state.output_path = Some(output);
            }
            Operation::Cleanup => {
                if let Some(output) = ctx.state.output_path.take() {
                    tracing::debug!(output = %output.display(), "Would remove output");
                }
            }
            Operation::MakePathOptionAbsolute => {
                if let Some(path) = ctx.options().get_str("path") {
                    let absolute = std::path::absolute(service_dir(ctx).join(path))?;
                    ctx.state
                        .attach(ABSOLUTE_PATH_KEY, absolute.display().to_string());
                }
            }
            Operation::Serve => {
                let port = ctx.options().get("port").cloned();
                tracing::debug!(port = ?port, "Would serve");
            }
            _ => {}
        }

        record(ctx, operation);
        Ok(())
    }
}

fn service_dir(ctx: &ExecutionContext) -> PathBuf {
    ctx.service()
        .service_dir
        .clone()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}

fn record(ctx: &mut ExecutionContext, operation: Operation) {
    let trace = ctx
        .state
        .attachments
        .entry(TRACE_KEY.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));

    if let Value::Array(calls) = trace {
        calls.push(Value::from(operation.as_str()));
    }
}

/// Operations traced so far
pub fn trace(state: &WorkingState) -> Vec<&str> {
    state
        .attachment(TRACE_KEY)
        .and_then(Value::as_array)
        .map(|calls| calls.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// One dry-run module per capability, in composition order
pub fn modules() -> Vec<Arc<dyn Capability>> {
    use Operation::{
        Cleanup, Compile, MakePathOptionAbsolute, PackExternalModules, Run, Serve, Validate, Watch,
        Wpwatch,
    };

    [
        DryRun::new("validate", &[Validate]),
        DryRun::new("compile", &[Compile]),
        DryRun::new("wpwatch", &[Wpwatch]),
        DryRun::new("cleanup", &[Cleanup]),
        DryRun::new("run", &[Run, Watch]),
        DryRun::new("serve", &[Serve]),
        DryRun::new("packExternalModules", &[PackExternalModules]),
        DryRun::new("makePathOptionAbsolute", &[MakePathOptionAbsolute]),
    ]
    .into_iter()
    .map(|module| Arc::new(module) as Arc<dyn Capability>)
    .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use packwise_config::ServiceDescriptor;
    use packwise_core::Options;
    use packwise_engine::{Host, compose};

    fn context(options: Options) -> ExecutionContext {
        let service = ServiceDescriptor {
            service: "orders".to_string(),
            service_dir: Some(PathBuf::from("/srv/orders")),
            ..ServiceDescriptor::default()
        };
        ExecutionContext::new(Host::new(service), options)
    }

    #[test]
    fn test_modules_cover_every_operation() {
        let set = compose(modules());
        for operation in Operation::ALL {
            assert!(set.provides(operation), "{operation} not provided");
        }
        assert!(set.overrides().is_empty());
    }

    #[tokio::test]
    async fn test_compile_defaults_output_to_service_dir() {
        let set = compose(modules());
        let mut ctx = context(Options::new());

        set.call(Operation::Compile, &mut ctx).await.unwrap();

        assert_eq!(
            ctx.state.output_path,
            Some(PathBuf::from("/srv/orders/.webpack"))
        );
        assert_eq!(trace(&ctx.state), vec!["compile"]);
    }

    #[tokio::test]
    async fn test_cleanup_clears_output() {
        let set = compose(modules());
        let mut ctx = context(Options::new().with("out", "dist"));

        set.call(Operation::Compile, &mut ctx).await.unwrap();
        assert_eq!(ctx.state.output_path, Some(PathBuf::from("dist")));

        set.call(Operation::Cleanup, &mut ctx).await.unwrap();
        assert!(ctx.state.output_path.is_none());
        assert_eq!(trace(&ctx.state), vec!["compile", "cleanup"]);
    }

    #[tokio::test]
    async fn test_path_option_made_absolute() {
        let set = compose(modules());
        let mut ctx = context(Options::new().with("path", "events/hello.json"));

        set.call(Operation::MakePathOptionAbsolute, &mut ctx)
            .await
            .unwrap();

        assert_eq!(
            ctx.state.attachment(ABSOLUTE_PATH_KEY),
            Some(&Value::from("/srv/orders/events/hello.json"))
        );
        // The invocation options are left untouched
        assert_eq!(ctx.options().get_str("path"), Some("events/hello.json"));
    }

    #[tokio::test]
    async fn test_run_module_provides_watch() {
        let set = compose(modules());
        assert_eq!(set.resolve(Operation::Watch).unwrap().name(), "run");

        let mut ctx = context(Options::new());
        set.call(Operation::Watch, &mut ctx).await.unwrap();
        assert_eq!(trace(&ctx.state), vec!["watch"]);
    }
}
