//! Conditional source extension loading
//!
//! When the bundler configuration is written in an extended source syntax
//! (TypeScript), capability modules need a runtime able to load it. The
//! loader looks at the configured path once per plugin construction and
//! activates the matching extension. Activation is process-wide and happens
//! at most once per extension: the registry lock is held across the
//! check and the activation, and a failed activation leaves nothing behind.

use indexmap::IndexMap;
use packwise_core::{Error, Result};
use std::path::PathBuf;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

/// Extensions activated in this process, keyed by extension id
static ACTIVE: LazyLock<Mutex<IndexMap<String, Activation>>> =
    LazyLock::new(|| Mutex::new(IndexMap::new()));

fn registry() -> MutexGuard<'static, IndexMap<String, Activation>> {
    ACTIVE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of a successful activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Source suffix the extension handles
    pub suffix: String,
    /// Executable that loads sources of that kind, if one was resolved
    pub runtime: Option<PathBuf>,
}

/// An optional extension enabling an extra source kind
pub trait SourceExtension: Send + Sync {
    /// Process-wide identity of the extension
    fn id(&self) -> &str;

    /// File suffix that triggers the extension, including the dot
    fn suffix(&self) -> &str;

    /// Perform the activation side effect
    fn activate(&self) -> Result<Activation>;
}

/// TypeScript support via an external TypeScript runtime
#[derive(Debug, Clone)]
pub struct TypeScriptExtension {
    runtime: String,
}

impl TypeScriptExtension {
    /// Default runtime looked up on `PATH`
    pub const DEFAULT_RUNTIME: &'static str = "ts-node";

    /// Use a different runtime executable
    #[must_use]
    pub fn with_runtime(runtime: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
        }
    }
}

impl Default for TypeScriptExtension {
    fn default() -> Self {
        Self::with_runtime(Self::DEFAULT_RUNTIME)
    }
}

impl SourceExtension for TypeScriptExtension {
    fn id(&self) -> &str {
        "typescript"
    }

    fn suffix(&self) -> &str {
        ".ts"
    }

    fn activate(&self) -> Result<Activation> {
        let runtime = which::which(&self.runtime).map_err(|e| Error::ExtensionActivation {
            extension: self.id().to_string(),
            reason: format!("'{}' not found: {e}", self.runtime),
        })?;

        Ok(Activation {
            suffix: self.suffix().to_string(),
            runtime: Some(runtime),
        })
    }
}

/// Activates at most one extension based on a configuration value
#[derive(Clone)]
pub struct ExtensionLoader {
    extensions: Vec<Arc<dyn SourceExtension>>,
}

impl Default for ExtensionLoader {
    fn default() -> Self {
        Self::new(vec![Arc::new(TypeScriptExtension::default())])
    }
}

impl std::fmt::Debug for ExtensionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<_> = self.extensions.iter().map(|ext| ext.id()).collect();
        f.debug_struct("ExtensionLoader")
            .field("extensions", &ids)
            .finish()
    }
}

impl ExtensionLoader {
    /// Create a loader recognizing the given extensions
    pub fn new(extensions: Vec<Arc<dyn SourceExtension>>) -> Self {
        Self { extensions }
    }

    /// A loader that never activates anything
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Activate the extension matching `config`, if any
    ///
    /// Returns the id of the matching extension. An absent or unrecognized
    /// value is not an error. An extension already active in this process is
    /// not activated again.
    pub fn load(&self, config: Option<&str>) -> Result<Option<String>> {
        let Some(config) = config else {
            tracing::trace!("No bundler configuration set, skipping extensions");
            return Ok(None);
        };

        let Some(extension) = self
            .extensions
            .iter()
            .find(|ext| config.ends_with(ext.suffix()))
        else {
            return Ok(None);
        };

        let id = extension.id().to_string();
        let mut active = registry();

        if active.contains_key(&id) {
            tracing::debug!(extension = %id, "Extension already active");
            return Ok(Some(id));
        }

        let activation = extension.activate()?;
        tracing::info!(
            extension = %id,
            suffix = %activation.suffix,
            runtime = ?activation.runtime,
            "Activated source extension"
        );
        active.insert(id.clone(), activation);

        Ok(Some(id))
    }
}

/// Whether an extension handling `suffix` is active in this process
#[must_use]
pub fn is_active(suffix: &str) -> bool {
    registry().values().any(|a| a.suffix == suffix)
}

/// Runtime resolved for `suffix` by its extension
#[must_use]
pub fn runtime_for(suffix: &str) -> Option<PathBuf> {
    registry()
        .values()
        .find(|a| a.suffix == suffix)
        .and_then(|a| a.runtime.clone())
}
