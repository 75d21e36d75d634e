//! Commands command
//!
//! Prints the command tree the plugin declares to the host.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use packwise_engine::{CommandNode, CommandTree};
use std::fmt::Write as _;

/// Run commands command
pub fn run(json: bool) -> Result<()> {
    let tree = CommandTree::build();

    if json {
        let output =
            serde_json::to_string_pretty(&tree).context("Failed to serialize command tree")?;
        println!("{output}");
    } else {
        print!("{}", render(&tree));
    }

    Ok(())
}

/// Render the tree as indented text
pub fn render(tree: &CommandTree) -> String {
    let mut out = String::new();
    for (name, node) in tree.iter() {
        render_node(&mut out, name, node, 0);
    }
    out
}

fn render_node(out: &mut String, name: &str, node: &CommandNode, depth: usize) {
    let indent = "  ".repeat(depth);

    let _ = writeln!(out, "{indent}{}  {}", name.bright_cyan().bold(), node.usage);
    if !node.lifecycle_events.is_empty() {
        let _ = writeln!(
            out,
            "{indent}  {} {}",
            "events:".dimmed(),
            node.lifecycle_events.join(", ")
        );
    }

    for (long, option) in &node.options {
        let flag = match option.shortcut {
            Some(short) => format!("--{long}, -{short}"),
            None => format!("--{long}"),
        };
        let required = if option.required { " (required)" } else { "" };
        let _ = writeln!(
            out,
            "{indent}  {} {}  {}{}",
            "option:".dimmed(),
            flag.yellow(),
            option.usage,
            required.red()
        );
    }

    for (child, sub) in &node.commands {
        render_node(out, child, sub, depth + 1);
    }
}
