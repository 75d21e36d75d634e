//! Packwise CLI library
//!
//! Front-end for driving the bundling plugin the way a host would: listing
//! what it declares, dispatching commands through the host lifecycle and
//! firing single events. Capability modules are dry-run stand-ins that trace
//! what would happen.

pub mod cmd;
pub mod dry_run;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use packwise_config::ServiceDescriptor;
use packwise_core::Options;
use std::path::{Path, PathBuf};

/// Packwise - lifecycle hooks for bundling serverless functions
#[derive(Parser)]
#[command(name = "packwise")]
#[command(about = "Drive the packwise bundling plugin from the command line")]
#[command(version)]
pub struct Cli {
    /// Path to the service descriptor (serverless.toml or serverless.json)
    #[arg(long, env = "PACKWISE_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "PACKWISE_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for packwise CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Print the command tree the plugin exposes to the host
    Commands {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the lifecycle event bindings
    Hooks {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dispatch a command through the host lifecycle
    Run {
        /// Command path, e.g. `webpack watch`
        #[arg(required = true, value_name = "COMMAND")]
        path: Vec<String>,

        /// Invocation option as name=value (repeatable)
        #[arg(short = 'O', long = "option", value_name = "NAME=VALUE")]
        options: Vec<String>,
    },

    /// Fire a single lifecycle event
    Emit {
        /// Fully qualified event name, e.g. `before:offline:start`
        event: String,

        /// Invocation option as name=value (repeatable)
        #[arg(short = 'O', long = "option", value_name = "NAME=VALUE")]
        options: Vec<String>,
    },
}

/// Main entry point for the CLI
pub fn run(cli: Cli) -> Result<()> {
    packwise_config::logging::init(cli.verbose, cli.log_file.as_deref())
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Commands { json } => cmd::commands::run(json),
        Commands::Hooks { json } => cmd::hooks::run(json),
        Commands::Run { path, options } => {
            let service = load_service(cli.config.as_deref())?;
            let options = parse_options(&options)?;
            runtime()?.block_on(cmd::run::run(service, &path, options))
        }
        Commands::Emit { event, options } => {
            let service = load_service(cli.config.as_deref())?;
            let options = parse_options(&options)?;
            runtime()?.block_on(cmd::run::emit(service, &event, options))
        }
    }
}

/// Load the service descriptor
///
/// An explicit path is loaded as given; otherwise the current directory is
/// searched.
pub fn load_service(config: Option<&Path>) -> Result<ServiceDescriptor> {
    let service = match config {
        Some(path) => ServiceDescriptor::load(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            ServiceDescriptor::discover(&cwd)?
        }
    };
    Ok(service)
}

/// Parse repeated `name=value` arguments into invocation options
pub fn parse_options<S: AsRef<str>>(args: &[S]) -> Result<Options> {
    args.iter()
        .map(|arg| Options::parse_assignment(arg.as_ref()).map_err(anyhow::Error::from))
        .collect()
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start async runtime")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "packwise", "run", "webpack", "watch", "-O", "function=hello", "--option", "verbose",
        ])
        .unwrap();

        match cli.command {
            Commands::Run { path, options } => {
                assert_eq!(path, vec!["webpack", "watch"]);
                assert_eq!(options, vec!["function=hello", "verbose"]);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_run_requires_a_command() {
        assert!(Cli::try_parse_from(["packwise", "run"]).is_err());
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(&["out=dist", "verbose", "watch=false"]).unwrap();
        assert_eq!(options.get_str("out"), Some("dist"));
        assert_eq!(options.get("verbose"), Some(&json!(true)));
        assert_eq!(options.get("watch"), Some(&json!(false)));

        assert!(parse_options(&["=oops"]).is_err());
    }

    #[test]
    fn test_load_service_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("serverless.json");
        std::fs::write(&path, r#"{ "service": "orders" }"#).unwrap();

        let service = load_service(Some(path.as_path())).unwrap();
        assert_eq!(service.service, "orders");
        assert_eq!(service.service_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_load_service_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_service(Some(dir.path().join("serverless.toml").as_path())).is_err());
    }
}
