//! Host lifecycle dispatch
//!
//! Reproduces how the host turns an invoked command into lifecycle events:
//! for every event `e` the command declares, the host fires `before:<path>:<e>`,
//! `<path>:<e>` and `after:<path>:<e>` in that order. Events the plugin has
//! no binding for are reported, not rejected.

use crate::commands::CommandNode;
use crate::hooks::HookOutcome;
use crate::plugin::Plugin;
use packwise_core::{Error, Options, Result};

/// An event fired during dispatch and what the plugin did with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredEvent {
    /// Fully qualified event name
    pub name: String,
    /// Outcome reported by the plugin
    pub outcome: HookOutcome,
}

fn join_path<S: AsRef<str>>(path: &[S], separator: &str) -> String {
    path.iter()
        .map(|segment| segment.as_ref())
        .collect::<Vec<&str>>()
        .join(separator)
}

/// Fully qualified event names fired for `node` reached via `path`
pub fn lifecycle_events<S: AsRef<str>>(path: &[S], node: &CommandNode) -> Vec<String> {
    let prefix = join_path(path, ":");

    node.lifecycle_events
        .iter()
        .flat_map(|event| {
            [
                format!("before:{prefix}:{event}"),
                format!("{prefix}:{event}"),
                format!("after:{prefix}:{event}"),
            ]
        })
        .collect()
}

/// Check that every required option of `node` was supplied
pub fn check_required_options<S: AsRef<str>>(
    path: &[S],
    node: &CommandNode,
    options: &Options,
) -> Result<()> {
    match node.required_options().find(|name| !options.contains(name)) {
        Some(missing) => Err(Error::MissingOption {
            command: join_path(path, " "),
            option: missing.to_string(),
        }),
        None => Ok(()),
    }
}

/// Run the command at `path` through the plugin's lifecycle
///
/// Stops at the first failing event and returns its error unchanged.
pub async fn dispatch<S: AsRef<str>>(plugin: &mut Plugin, path: &[S]) -> Result<Vec<FiredEvent>> {
    let node = plugin
        .commands()
        .resolve(path)
        .ok_or_else(|| Error::UnknownCommand(join_path(path, " ")))?;

    check_required_options(path, node, plugin.context().options())?;
    let events = lifecycle_events(path, node);

    let mut fired = Vec::with_capacity(events.len());
    for name in events {
        let outcome = plugin.run_hook(&name).await?;
        if outcome == HookOutcome::Unhandled {
            tracing::debug!(event = %name, "Event not handled by plugin");
        } else {
            tracing::info!(event = %name, "Event handled");
        }
        fired.push(FiredEvent { name, outcome });
    }

    Ok(fired)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::commands::CommandTree;

    #[test]
    fn test_lifecycle_events_for_root() {
        let tree = CommandTree::build();
        let node = tree.get("webpack").unwrap();

        assert_eq!(
            lifecycle_events(&["webpack"], node),
            vec![
                "before:webpack:validate",
                "webpack:validate",
                "after:webpack:validate",
                "before:webpack:compile",
                "webpack:compile",
                "after:webpack:compile",
            ]
        );
    }

    #[test]
    fn test_lifecycle_events_for_subcommand() {
        let tree = CommandTree::build();
        let path = ["webpack", "serve"];
        let node = tree.resolve(&path).unwrap();

        assert_eq!(
            lifecycle_events(&path, node),
            vec![
                "before:webpack:serve:serve",
                "webpack:serve:serve",
                "after:webpack:serve:serve",
            ]
        );
    }

    #[test]
    fn test_required_options() {
        let tree = CommandTree::build();
        let path = ["webpack", "watch"];
        let node = tree.resolve(&path).unwrap();

        let err = check_required_options(&path, node, &Options::new().with("path", "e.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingOption { ref command, ref option }
                if command == "webpack watch" && option == "function"
        ));

        check_required_options(&path, node, &Options::new().with("function", "hello")).unwrap();
    }
}
