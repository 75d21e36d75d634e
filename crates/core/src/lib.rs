//! Core types and utilities for packwise
//!
//! This is the foundation crate (Layer 0) that all other packwise crates depend on.
//! It provides:
//! - Base error types, including the host-recognized error kind
//! - Capability operation identifiers
//! - Parsed invocation options
//!
//! This crate has no dependencies on other packwise crates.

pub mod error;
pub mod operation;
pub mod options;

pub use error::{Error, HostError, Result};
pub use operation::Operation;
pub use options::Options;
