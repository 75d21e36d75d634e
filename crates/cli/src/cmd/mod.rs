//! CLI command implementations
//!
//! This module contains all command implementations for the packwise CLI.

pub mod commands;
pub mod hooks;
pub mod run;
