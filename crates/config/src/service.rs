//! Service descriptor
//!
//! The host describes the service being deployed in a descriptor file. The
//! plugin only reads it: the `custom.webpack` value decides whether a source
//! extension has to be activated, and capability modules look up functions
//! and provider settings from it.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed by [`ServiceDescriptor::discover`], in order
pub const DESCRIPTOR_FILES: [&str; 2] = ["serverless.toml", "serverless.json"];

/// Provider section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (e.g. `aws`)
    pub name: String,

    /// Function runtime (e.g. `nodejs18.x`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

/// A single function of the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionConfig {
    /// Handler entry, `path/to/module.export`
    pub handler: String,
}

/// Plugin-specific `custom` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomConfig {
    /// Path to the bundler configuration file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webpack: Option<String>,

    /// Settings owned by other plugins
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Host service descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Service name
    pub service: String,

    /// Provider settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,

    /// Functions keyed by name, in declaration order
    #[serde(default)]
    pub functions: IndexMap<String, FunctionConfig>,

    /// Plugin settings
    #[serde(default)]
    pub custom: CustomConfig,

    /// Directory the descriptor was loaded from
    #[serde(skip)]
    pub service_dir: Option<PathBuf>,
}

impl ServiceDescriptor {
    /// Load a descriptor from a file
    ///
    /// The format is picked from the extension: `.json` is parsed as JSON,
    /// anything else as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read service file {}: {e}",
                path.display()
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut descriptor = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
        .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;

        descriptor.service_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(service = %descriptor.service, path = %path.display(), "Loaded service descriptor");

        Ok(descriptor)
    }

    /// Find and load the descriptor in `dir`
    pub fn discover(dir: &Path) -> Result<Self> {
        let found = DESCRIPTOR_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());

        match found {
            Some(path) => Self::load(path),
            None => Err(Error::Config(format!(
                "No service file found in {}.\nExpected one of: {}",
                dir.display(),
                DESCRIPTOR_FILES.join(", ")
            ))),
        }
    }

    /// Parse a TOML descriptor
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {e}")))
    }

    /// Parse a JSON descriptor
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(format!("Invalid JSON: {e}")))
    }

    /// The configured bundler configuration path, if any
    #[must_use]
    pub fn webpack_config(&self) -> Option<&str> {
        self.custom.webpack.as_deref()
    }

    /// Look up a function by name
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&FunctionConfig> {
        self.functions.get(name)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use tempfile::TempDir;

    const TOML_SERVICE: &str = r#"
service = "orders"

[provider]
name = "aws"
runtime = "nodejs18.x"

[functions.create]
handler = "src/create.handler"

[functions.list]
handler = "src/list.handler"

[custom]
webpack = "webpack.config.ts"

[custom.offline]
port = 4000
"#;

    #[test]
    fn test_from_toml_str() {
        let descriptor = ServiceDescriptor::from_toml_str(TOML_SERVICE).unwrap();

        assert_eq!(descriptor.service, "orders");
        assert_eq!(descriptor.provider.as_ref().unwrap().name, "aws");
        assert_eq!(descriptor.webpack_config(), Some("webpack.config.ts"));
        assert_eq!(
            descriptor.function("list").unwrap().handler,
            "src/list.handler"
        );

        let names: Vec<_> = descriptor.functions.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["create", "list"]);

        assert_eq!(
            descriptor.custom.extra.get("offline"),
            Some(&serde_json::json!({ "port": 4000 }))
        );
    }

    #[test]
    fn test_minimal_descriptor_has_no_webpack_config() {
        let descriptor = ServiceDescriptor::from_toml_str("service = \"bare\"").unwrap();
        assert_eq!(descriptor.webpack_config(), None);
        assert!(descriptor.functions.is_empty());
        assert!(descriptor.provider.is_none());
    }

    #[test]
    fn test_from_json_str() {
        let descriptor = ServiceDescriptor::from_json_str(
            r#"{"service":"api","custom":{"webpack":"webpack.config.js"}}"#,
        )
        .unwrap();
        assert_eq!(descriptor.service, "api");
        assert_eq!(descriptor.webpack_config(), Some("webpack.config.js"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ServiceDescriptor::from_toml_str("service = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_discover_prefers_toml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("serverless.toml"), "service = \"from-toml\"").unwrap();
        fs::write(
            temp.path().join("serverless.json"),
            r#"{"service":"from-json"}"#,
        )
        .unwrap();

        let descriptor = ServiceDescriptor::discover(temp.path()).unwrap();
        assert_eq!(descriptor.service, "from-toml");
        assert_eq!(descriptor.service_dir.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_discover_json() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("serverless.json"),
            r#"{"service":"from-json"}"#,
        )
        .unwrap();

        let descriptor = ServiceDescriptor::discover(temp.path()).unwrap();
        assert_eq!(descriptor.service, "from-json");
    }

    #[test]
    fn test_discover_missing() {
        let temp = TempDir::new().unwrap();
        let err = ServiceDescriptor::discover(temp.path()).unwrap_err();
        assert!(err.to_string().contains("No service file found"));
    }
}
