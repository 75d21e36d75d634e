//! # Packwise Engine
//!
//! Composition and hook-binding engine behind the packwise bundling plugin.
//!
//! The engine never bundles anything itself. It:
//!
//! - **Extensions**: activates an optional source extension once per process
//! - **Capabilities**: merges independently implemented capability modules
//!   into one dispatch table (later modules win)
//! - **Commands**: declares the command tree the host CLI exposes
//! - **Hooks**: binds host lifecycle events to ordered, fail-fast pipelines
//!   over a single shared [`ExecutionContext`]
//! - **Lifecycle**: a small host-side dispatcher that fires the events of an
//!   invoked command against the plugin

pub mod capability;
pub mod commands;
pub mod compose;
pub mod context;
pub mod extension;
pub mod hooks;
pub mod lifecycle;
pub mod plugin;

// Re-export error types from core
pub use packwise_core::{Error, HostError, Operation, Options, Result};

// Re-export commonly used types
pub use capability::Capability;
pub use commands::{CommandNode, CommandOption, CommandTree};
pub use compose::{CapabilitySet, Override, compose};
pub use context::{ExecutionContext, Host, WorkingState};
pub use extension::{ExtensionLoader, SourceExtension, TypeScriptExtension};
pub use hooks::{HookOutcome, HookRunner, HookTable, Pipeline, PipelineStep};
pub use plugin::{Plugin, PluginBuilder};
