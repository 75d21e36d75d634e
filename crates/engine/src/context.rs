//! Shared execution context
//!
//! Every capability operation receives the same [`ExecutionContext`]. The
//! host handle and the invocation options are read-only; [`WorkingState`] is
//! where operations leave results for the operations (and pipelines) that
//! run after them.

use indexmap::IndexMap;
use packwise_config::ServiceDescriptor;
use packwise_core::{Error, HostError, Options};
use std::path::PathBuf;
use std::sync::Arc;

/// Handle on the host runtime
///
/// Carries the service descriptor and acts as the factory for errors the host
/// recognizes as its own.
#[derive(Debug, Clone, Default)]
pub struct Host {
    service: Arc<ServiceDescriptor>,
}

impl Host {
    /// Create a host handle for a loaded service
    pub fn new(service: ServiceDescriptor) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// The service descriptor
    #[must_use]
    pub fn service(&self) -> &ServiceDescriptor {
        &self.service
    }

    /// Construct a host-recognized failure
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::Host(HostError::new(message))
    }
}

/// Mutable fields capability operations attach to the context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingState {
    /// Where the last compile wrote its bundles
    pub output_path: Option<PathBuf>,

    /// Statistics reported by the last compile
    pub compile_stats: Option<serde_json::Value>,

    /// Dependencies kept out of the bundle and packaged separately
    pub external_modules: Vec<String>,

    /// Anything else an operation wants to hand on, keyed by name
    pub attachments: IndexMap<String, serde_json::Value>,
}

impl WorkingState {
    /// Attach a named value, replacing any previous one
    pub fn attach(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.attachments.insert(key.into(), value.into());
    }

    /// Look up an attached value
    #[must_use]
    pub fn attachment(&self, key: &str) -> Option<&serde_json::Value> {
        self.attachments.get(key)
    }
}

/// The single object shared by all capability operations
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    host: Host,
    options: Options,
    /// Fields left behind by operations
    pub state: WorkingState,
}

impl ExecutionContext {
    /// Create a context with empty working state
    pub fn new(host: Host, options: Options) -> Self {
        Self {
            host,
            options,
            state: WorkingState::default(),
        }
    }

    /// The host handle
    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Shortcut for the host's service descriptor
    #[must_use]
    pub fn service(&self) -> &ServiceDescriptor {
        self.host.service()
    }

    /// Options the command was invoked with
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_host_error_factory() {
        let host = Host::default();
        let err = host.error("Use something else");
        let host_err = err.as_host().unwrap();
        assert_eq!(host_err.kind(), HostError::KIND);
        assert_eq!(host_err.message(), "Use something else");
    }

    #[test]
    fn test_context_exposes_service_and_options() {
        let service = ServiceDescriptor {
            service: "orders".to_string(),
            ..ServiceDescriptor::default()
        };
        let ctx = ExecutionContext::new(Host::new(service), Options::new().with("out", "dist"));

        assert_eq!(ctx.service().service, "orders");
        assert_eq!(ctx.options().get_str("out"), Some("dist"));
        assert_eq!(ctx.state, WorkingState::default());
    }

    #[test]
    fn test_attachments_replace() {
        let mut state = WorkingState::default();
        state.attach("entries", 1);
        state.attach("entries", 2);
        assert_eq!(state.attachment("entries"), Some(&serde_json::json!(2)));
        assert_eq!(state.attachments.len(), 1);
    }
}
