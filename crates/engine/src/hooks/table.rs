//! Hook binding table
//!
//! The table is built once and never changes afterwards. Event names are
//! owned by the host; the plugin only decides which operations run for them.

use indexmap::IndexMap;
use packwise_core::Operation;
use serde::Serialize;
use std::fmt;

/// Lifecycle event names the plugin binds
pub mod events {
    /// Before the host packages deployment artifacts
    pub const BEFORE_DEPLOY_ARTIFACTS: &str = "before:deploy:createDeploymentArtifacts";
    /// After the host packaged deployment artifacts
    pub const AFTER_DEPLOY_ARTIFACTS: &str = "after:deploy:createDeploymentArtifacts";
    /// Before the host runs a function locally
    pub const BEFORE_INVOKE_LOCAL: &str = "before:invoke:local:invoke";
    /// `webpack` command, validate event
    pub const WEBPACK_VALIDATE: &str = "webpack:validate";
    /// `webpack` command, compile event
    pub const WEBPACK_COMPILE: &str = "webpack:compile";
    /// `webpack invoke`
    pub const WEBPACK_INVOKE: &str = "webpack:invoke:invoke";
    /// `webpack watch`
    pub const WEBPACK_WATCH: &str = "webpack:watch:watch";
    /// `webpack serve`
    pub const WEBPACK_SERVE: &str = "webpack:serve:serve";
    /// Before the offline plugin starts
    pub const BEFORE_OFFLINE_START: &str = "before:offline:start";
    /// Before the offline plugin's init step
    pub const BEFORE_OFFLINE_START_INIT: &str = "before:offline:start:init";
}

/// Message of the disabled `webpack invoke` path
pub const INVOKE_DISABLED_MESSAGE: &str = "Use \"serverless invoke local\" instead.";

/// One step of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStep {
    /// Call a capability operation
    Call(Operation),
    /// Fail with a host error carrying this message
    Reject(&'static str),
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call(operation) => write!(f, "{operation}"),
            Self::Reject(message) => write!(f, "reject({message})"),
        }
    }
}

/// Ordered steps bound to one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Pipeline(Vec<PipelineStep>);

impl Pipeline {
    /// A pipeline calling the given operations in order
    pub fn calls(operations: &[Operation]) -> Self {
        Self(operations.iter().copied().map(PipelineStep::Call).collect())
    }

    /// A single step that always fails
    #[must_use]
    pub fn reject(message: &'static str) -> Self {
        Self(vec![PipelineStep::Reject(message)])
    }

    /// Steps in execution order
    #[must_use]
    pub fn steps(&self) -> &[PipelineStep] {
        &self.0
    }

    /// Operations called by this pipeline, in order
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.0.iter().filter_map(|step| match step {
            PipelineStep::Call(operation) => Some(*operation),
            PipelineStep::Reject(_) => None,
        })
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the pipeline has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// Lifecycle event name -> pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HookTable(IndexMap<String, Pipeline>);

impl HookTable {
    /// The plugin's bindings
    #[must_use]
    pub fn build() -> Self {
        use Operation::{
            Cleanup, Compile, MakePathOptionAbsolute, PackExternalModules, Serve, Validate, Watch,
            Wpwatch,
        };

        let bindings = [
            (
                events::BEFORE_DEPLOY_ARTIFACTS,
                Pipeline::calls(&[Validate, Compile, PackExternalModules]),
            ),
            (events::AFTER_DEPLOY_ARTIFACTS, Pipeline::calls(&[Cleanup])),
            (
                events::BEFORE_INVOKE_LOCAL,
                Pipeline::calls(&[Validate, Compile, MakePathOptionAbsolute]),
            ),
            (events::WEBPACK_VALIDATE, Pipeline::calls(&[Validate])),
            (
                events::WEBPACK_COMPILE,
                Pipeline::calls(&[Compile, PackExternalModules]),
            ),
            (
                events::WEBPACK_INVOKE,
                Pipeline::reject(INVOKE_DISABLED_MESSAGE),
            ),
            (
                events::WEBPACK_WATCH,
                Pipeline::calls(&[Validate, MakePathOptionAbsolute, Watch]),
            ),
            (events::WEBPACK_SERVE, Pipeline::calls(&[Validate, Serve])),
            (
                events::BEFORE_OFFLINE_START,
                Pipeline::calls(&[Validate, Wpwatch]),
            ),
            (
                events::BEFORE_OFFLINE_START_INIT,
                Pipeline::calls(&[Validate, Wpwatch]),
            ),
        ];

        let mut table = IndexMap::with_capacity(bindings.len());
        for (event, pipeline) in bindings {
            let previous = table.insert(event.to_string(), pipeline);
            debug_assert!(previous.is_none(), "event bound twice: {event}");
        }

        Self(table)
    }

    /// Pipeline bound to an event
    #[must_use]
    pub fn get(&self, event: &str) -> Option<&Pipeline> {
        self.0.get(event)
    }

    /// Whether the event has a binding
    #[must_use]
    pub fn contains(&self, event: &str) -> bool {
        self.0.contains_key(event)
    }

    /// Bound event names in declaration order
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pipeline)> {
        self.0.iter().map(|(event, pipeline)| (event.as_str(), pipeline))
    }

    /// Number of bound events
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
