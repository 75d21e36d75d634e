//! Parsed invocation options
//!
//! The host parses command line options and hands them over as a flat,
//! ordered map from option name to value.

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options supplied with the invoked command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(IndexMap<String, Value>);

impl Options {
    /// Create an empty option set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Insert or replace an option value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Raw option value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Option value as a string, if it is one
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Whether the option was supplied at all
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of supplied options
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no options were supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over options in the order they were supplied
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Parse a `name=value` assignment
    ///
    /// `true`/`false` become booleans, everything else stays a string.
    /// A bare `name` is a boolean flag set to `true`.
    pub fn parse_assignment(input: &str) -> Result<(String, Value)> {
        let (name, value) = match input.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value)),
            None => (input.trim(), None),
        };

        if name.is_empty() {
            return Err(Error::Message(format!(
                "Invalid option '{input}': expected name=value"
            )));
        }

        let value = match value {
            None | Some("true") => Value::Bool(true),
            Some("false") => Value::Bool(false),
            Some(other) => Value::String(other.to_string()),
        };

        Ok((name.to_string(), value))
    }
}

impl FromIterator<(String, Value)> for Options {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_lookup() {
        let options = Options::new().with("function", "hello").with("port", 3000);

        assert_eq!(options.get_str("function"), Some("hello"));
        assert_eq!(options.get("port"), Some(&json!(3000)));
        assert_eq!(options.get_str("port"), None);
        assert!(!options.contains("path"));
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            Options::parse_assignment("path=event.json").unwrap(),
            ("path".to_string(), json!("event.json"))
        );
        assert_eq!(
            Options::parse_assignment("verbose").unwrap(),
            ("verbose".to_string(), json!(true))
        );
        assert_eq!(
            Options::parse_assignment("watch=false").unwrap(),
            ("watch".to_string(), json!(false))
        );
        assert_eq!(
            Options::parse_assignment("data={\"a\":1}").unwrap(),
            ("data".to_string(), json!("{\"a\":1}"))
        );
    }

    #[test]
    fn test_parse_assignment_rejects_empty_name() {
        assert!(Options::parse_assignment("=value").is_err());
        assert!(Options::parse_assignment("").is_err());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let options: Options = ["out", "function", "data"]
            .into_iter()
            .map(|name| (name.to_string(), json!(true)))
            .collect();

        let names: Vec<_> = options.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["out", "function", "data"]);
    }
}
