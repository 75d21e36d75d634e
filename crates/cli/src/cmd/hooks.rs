//! Hooks command
//!
//! Prints which pipeline runs for each lifecycle event the plugin binds.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use packwise_engine::HookTable;
use std::fmt::Write as _;

/// Run hooks command
pub fn run(json: bool) -> Result<()> {
    let table = HookTable::build();

    if json {
        let output =
            serde_json::to_string_pretty(&table).context("Failed to serialize hook table")?;
        println!("{output}");
    } else {
        print!("{}", render(&table));
    }

    Ok(())
}

/// Render one line per binding
pub fn render(table: &HookTable) -> String {
    let width = table.events().map(str::len).max().unwrap_or(0);

    let mut out = String::new();
    for (event, pipeline) in table.iter() {
        let _ = writeln!(
            out,
            "{}  {}",
            format!("{event:<width$}").bright_cyan(),
            pipeline
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use packwise_engine::hooks::events;

    #[test]
    fn test_render_one_line_per_event() {
        let table = HookTable::build();
        let text = render(&table);

        assert_eq!(text.lines().count(), table.len());
        let serve = text
            .lines()
            .find(|line| line.contains(events::WEBPACK_SERVE))
            .unwrap_or_default();
        assert!(serve.ends_with("validate → serve"), "{serve}");
    }
}
