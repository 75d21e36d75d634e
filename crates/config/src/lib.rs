//! Configuration management for packwise
//!
//! This crate handles:
//! - Service descriptor loading (`serverless.toml` / `serverless.json`)
//! - Logging initialization

pub mod logging;
pub mod service;

// Re-export error types from core
pub use packwise_core::{Error, Result};

// Re-export main types
pub use service::{CustomConfig, FunctionConfig, ProviderConfig, ServiceDescriptor};
