//! Capability operation identifiers
//!
//! Pipelines address capability operations purely by name. The names are the
//! ones the host-facing plugin has always used, so they stay camelCase.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named asynchronous operation provided by a capability module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    /// Check the service and bundler configuration
    #[serde(rename = "validate")]
    Validate,
    /// Run the bundler once
    #[serde(rename = "compile")]
    Compile,
    /// Watch sources and recompile in the background (offline mode)
    #[serde(rename = "wpwatch")]
    Wpwatch,
    /// Remove intermediate bundle output
    #[serde(rename = "cleanup")]
    Cleanup,
    /// Run a function from the bundle output
    #[serde(rename = "run")]
    Run,
    /// Serve functions locally
    #[serde(rename = "serve")]
    Serve,
    /// Re-run a function whenever the bundle changes
    #[serde(rename = "watch")]
    Watch,
    /// Install and package externalized dependencies
    #[serde(rename = "packExternalModules")]
    PackExternalModules,
    /// Turn the `path` option into an absolute path
    #[serde(rename = "makePathOptionAbsolute")]
    MakePathOptionAbsolute,
}

impl Operation {
    /// Every operation known to the engine
    pub const ALL: [Operation; 9] = [
        Operation::Validate,
        Operation::Compile,
        Operation::Wpwatch,
        Operation::Cleanup,
        Operation::Run,
        Operation::Serve,
        Operation::Watch,
        Operation::PackExternalModules,
        Operation::MakePathOptionAbsolute,
    ];

    /// Name used to address the operation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::Compile => "compile",
            Self::Wpwatch => "wpwatch",
            Self::Cleanup => "cleanup",
            Self::Run => "run",
            Self::Serve => "serve",
            Self::Watch => "watch",
            Self::PackExternalModules => "packExternalModules",
            Self::MakePathOptionAbsolute => "makePathOptionAbsolute",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| Error::UnknownOperation(s.to_string()))
    }
}
