//! Run and emit commands
//!
//! `run` plays the host: it resolves a command path, checks its required
//! options and fires every lifecycle event of the command at the plugin.
//! `emit` fires exactly one event. Both use the dry-run capability modules.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use packwise_config::ServiceDescriptor;
use packwise_core::Options;
use packwise_engine::lifecycle::{self, FiredEvent};
use packwise_engine::{HookOutcome, Host, Plugin, WorkingState};

use crate::dry_run;

/// Result of a dry run
#[derive(Debug)]
pub struct Report {
    /// Events fired, in order
    pub fired: Vec<FiredEvent>,
    /// Working state left behind by the pipelines
    pub state: WorkingState,
}

impl Report {
    /// Operations called across all pipelines, in order
    pub fn operations(&self) -> Vec<&str> {
        dry_run::trace(&self.state)
    }
}

/// Construct the plugin over the dry-run modules
pub fn build_plugin(service: ServiceDescriptor, options: Options) -> Result<Plugin> {
    let plugin = Plugin::builder(Host::new(service), options)
        .capabilities(dry_run::modules())
        .build()
        .context("Failed to construct plugin")?;

    if let Some(extension) = plugin.extension() {
        tracing::info!(extension, "Source extension active");
    }

    Ok(plugin)
}

/// Dispatch the command at `path` and collect what happened
pub async fn dispatch<S: AsRef<str>>(
    service: ServiceDescriptor,
    path: &[S],
    options: Options,
) -> Result<Report> {
    let mut plugin = build_plugin(service, options)?;
    let fired = lifecycle::dispatch(&mut plugin, path).await?;

    Ok(Report {
        fired,
        state: plugin.context().state.clone(),
    })
}

/// Fire a single event and collect what happened
pub async fn fire(service: ServiceDescriptor, event: &str, options: Options) -> Result<Report> {
    let mut plugin = build_plugin(service, options)?;
    let outcome = plugin.run_hook(event).await?;

    Ok(Report {
        fired: vec![FiredEvent {
            name: event.to_string(),
            outcome,
        }],
        state: plugin.context().state.clone(),
    })
}

/// Run run command
pub async fn run(service: ServiceDescriptor, path: &[String], options: Options) -> Result<()> {
    let command = path.join(" ");
    let report = dispatch(service, path, options)
        .await
        .with_context(|| format!("Command '{command}' failed"))?;

    print_report(&report);
    Ok(())
}

/// Run emit command
pub async fn emit(service: ServiceDescriptor, event: &str, options: Options) -> Result<()> {
    let report = fire(service, event, options)
        .await
        .with_context(|| format!("Event '{event}' failed"))?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    for event in &report.fired {
        match event.outcome {
            HookOutcome::Completed { steps } => {
                println!("{} {} ({steps} steps)", "✓".green(), event.name);
            }
            HookOutcome::Unhandled => {
                println!("{} {}", "·".dimmed(), event.name.dimmed());
            }
        }
    }

    let operations = report.operations();
    if !operations.is_empty() {
        println!("\n{} {}", "Operations:".bold(), operations.join(" → "));
    }
    if let Some(output) = &report.state.output_path {
        println!("{} {}", "Output:".bold(), output.display());
    }
}
