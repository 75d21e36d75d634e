//! Capability composition
//!
//! Merges capability modules into one dispatch table keyed by operation
//! name. Modules are applied in list order and a later module replaces an
//! earlier one on collision. Nothing is validated and no module is asked
//! about conflicts; every replacement is recorded so it can be inspected.

use crate::capability::Capability;
use crate::context::ExecutionContext;
use indexmap::IndexMap;
use packwise_core::{Error, Operation, Result};
use std::sync::Arc;

/// A dispatch entry that replaced an earlier module's binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    /// The contested operation
    pub operation: Operation,
    /// Module that lost the binding
    pub replaced: String,
    /// Module that now provides the operation
    pub winner: String,
}

/// Composed operations of all capability modules
#[derive(Clone, Default)]
pub struct CapabilitySet {
    modules: Vec<Arc<dyn Capability>>,
    /// Operation -> index into `modules`
    dispatch: IndexMap<Operation, usize>,
    overrides: Vec<Override>,
}

impl std::fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilitySet")
            .field("modules", &self.module_names().collect::<Vec<_>>())
            .field("operations", &self.dispatch.keys().collect::<Vec<_>>())
            .field("overrides", &self.overrides)
            .finish()
    }
}

/// Compose capability modules, last one wins on collision
pub fn compose<I>(modules: I) -> CapabilitySet
where
    I: IntoIterator<Item = Arc<dyn Capability>>,
{
    let mut set = CapabilitySet::default();

    for module in modules {
        let index = set.modules.len();

        for &operation in module.operations() {
            if let Some(previous) = set.dispatch.insert(operation, index)
                && previous != index
            {
                let replaced = set.modules[previous].name().to_string();
                tracing::debug!(
                    %operation,
                    replaced = %replaced,
                    winner = %module.name(),
                    "Capability operation overridden"
                );
                set.overrides.push(Override {
                    operation,
                    replaced,
                    winner: module.name().to_string(),
                });
            }
        }

        set.modules.push(module);
    }

    tracing::debug!(
        modules = set.modules.len(),
        operations = set.dispatch.len(),
        "Composed capability modules"
    );

    set
}

impl CapabilitySet {
    /// Module currently bound to an operation
    #[must_use]
    pub fn resolve(&self, operation: Operation) -> Option<&Arc<dyn Capability>> {
        self.dispatch
            .get(&operation)
            .map(|&index| &self.modules[index])
    }

    /// Whether any module provides the operation
    #[must_use]
    pub fn provides(&self, operation: Operation) -> bool {
        self.dispatch.contains_key(&operation)
    }

    /// All bound operations, in first-registration order
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.dispatch.keys().copied()
    }

    /// Module names in composition order
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|module| module.name())
    }

    /// Bindings replaced during composition
    #[must_use]
    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    /// Invoke an operation on whichever module owns it
    pub async fn call(&self, operation: Operation, ctx: &mut ExecutionContext) -> Result<()> {
        let module = self.resolve(operation).ok_or_else(|| Error::MissingOperation {
            operation: operation.to_string(),
        })?;

        module.call(operation, ctx).await
    }
}
