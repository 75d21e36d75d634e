//! The host-facing plugin
//!
//! Construction activates the configured source extension, composes the
//! capability modules and declares the command tree and hook table. The
//! plugin then owns the one execution context every pipeline runs against.

use crate::capability::Capability;
use crate::commands::CommandTree;
use crate::compose::{CapabilitySet, compose};
use crate::context::{ExecutionContext, Host};
use crate::extension::ExtensionLoader;
use crate::hooks::{HookOutcome, HookRunner, HookTable};
use packwise_core::{Options, Result};
use std::sync::Arc;

/// Bundling plugin instance
#[derive(Debug)]
pub struct Plugin {
    commands: CommandTree,
    hooks: HookTable,
    capabilities: CapabilitySet,
    context: ExecutionContext,
    extension: Option<String>,
}

impl Plugin {
    /// Start configuring a plugin for a host and its parsed options
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut plugin = Plugin::builder(host, options)
    ///     .capability(Validate::default())
    ///     .capability(Compile::default())
    ///     .build()?;
    ///
    /// plugin.run_hook("webpack:validate").await?;
    /// ```
    pub fn builder(host: Host, options: Options) -> PluginBuilder {
        PluginBuilder {
            host,
            options,
            modules: Vec::new(),
            loader: ExtensionLoader::default(),
        }
    }

    /// Command tree exposed to the host CLI
    #[must_use]
    pub fn commands(&self) -> &CommandTree {
        &self.commands
    }

    /// Lifecycle event bindings
    #[must_use]
    pub fn hooks(&self) -> &HookTable {
        &self.hooks
    }

    /// Composed capability operations
    #[must_use]
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// The shared execution context
    #[must_use]
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Id of the source extension the configuration asked for, if any
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Run the pipeline bound to `event`
    ///
    /// An event without a binding is reported as [`HookOutcome::Unhandled`].
    /// A failing step's error is returned unchanged.
    pub async fn run_hook(&mut self, event: &str) -> Result<HookOutcome> {
        let Some(pipeline) = self.hooks.get(event) else {
            tracing::trace!(hook = event, "No binding for event");
            return Ok(HookOutcome::Unhandled);
        };

        HookRunner::new(&self.capabilities)
            .run(event, pipeline, &mut self.context)
            .await?;

        Ok(HookOutcome::Completed {
            steps: pipeline.len(),
        })
    }
}

/// Builder for [`Plugin`]
pub struct PluginBuilder {
    host: Host,
    options: Options,
    modules: Vec<Arc<dyn Capability>>,
    loader: ExtensionLoader,
}

impl PluginBuilder {
    /// Append a capability module
    ///
    /// Modules added later take precedence on operation name collisions.
    #[must_use]
    pub fn capability<C: Capability + 'static>(mut self, module: C) -> Self {
        self.modules.push(Arc::new(module));
        self
    }

    /// Append already shared capability modules, in order
    #[must_use]
    pub fn capabilities<I>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Capability>>,
    {
        self.modules.extend(modules);
        self
    }

    /// Replace the extension loader
    #[must_use]
    pub fn extension_loader(mut self, loader: ExtensionLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Construct the plugin
    ///
    /// Fails only when the configured source extension cannot be activated.
    pub fn build(self) -> Result<Plugin> {
        let extension = self.loader.load(self.host.service().webpack_config())?;

        let capabilities = compose(self.modules);
        let commands = CommandTree::build();
        let hooks = HookTable::build();

        tracing::debug!(
            service = %self.host.service().service,
            extension = ?extension,
            hooks = hooks.len(),
            "Plugin constructed"
        );

        Ok(Plugin {
            commands,
            hooks,
            capabilities,
            context: ExecutionContext::new(self.host, self.options),
            extension,
        })
    }
}
