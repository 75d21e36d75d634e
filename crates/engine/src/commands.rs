//! Command tree exposed to the host CLI
//!
//! Declares the `webpack` command, its sub-commands, the lifecycle events
//! each one raises and the options it accepts. Only required/optional flags
//! are declared here; checking supplied values is up to the capability
//! modules.

use indexmap::IndexMap;
use serde::Serialize;

/// Name of the top-level command
pub const ROOT_COMMAND: &str = "webpack";

/// A command option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOption {
    /// Help text
    pub usage: String,

    /// Single-character short form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<char>,

    /// Whether the host must refuse to run the command without it
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl CommandOption {
    /// An optional option
    pub fn optional(usage: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            shortcut: None,
            required: false,
        }
    }

    /// A required option
    pub fn required(usage: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::optional(usage)
        }
    }

    /// Set the short form
    #[must_use]
    pub fn shortcut(mut self, shortcut: char) -> Self {
        self.shortcut = Some(shortcut);
        self
    }
}

/// A command or sub-command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandNode {
    /// Help text
    pub usage: String,

    /// Lifecycle events raised, in order
    pub lifecycle_events: Vec<String>,

    /// Accepted options
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, CommandOption>,

    /// Nested sub-commands
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub commands: IndexMap<String, CommandNode>,
}

impl CommandNode {
    /// A command with no events, options or sub-commands yet
    pub fn new(usage: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            lifecycle_events: Vec::new(),
            options: IndexMap::new(),
            commands: IndexMap::new(),
        }
    }

    /// Append a lifecycle event
    #[must_use]
    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.lifecycle_events.push(name.into());
        self
    }

    /// Add an option
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, option: CommandOption) -> Self {
        self.options.insert(name.into(), option);
        self
    }

    /// Add a sub-command
    #[must_use]
    pub fn command(mut self, name: impl Into<String>, node: CommandNode) -> Self {
        self.commands.insert(name.into(), node);
        self
    }

    /// Names of the options that must be supplied
    pub fn required_options(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|(_, option)| option.required)
            .map(|(name, _)| name.as_str())
    }
}

/// Top-level commands keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandTree(IndexMap<String, CommandNode>);

impl CommandTree {
    /// The plugin's command tree
    #[must_use]
    pub fn build() -> Self {
        let invoke = CommandNode::new("Run a function locally from the webpack output bundle")
            .event("invoke");

        let watch = CommandNode::new(
            "Run a function from the webpack output bundle every time the source is changed",
        )
        .event("watch")
        .option(
            "function",
            CommandOption::required("Name of the function").shortcut('f'),
        )
        .option(
            "path",
            CommandOption::optional("Path to JSON or YAML file holding input data").shortcut('p'),
        )
        .option("data", CommandOption::optional("input data").shortcut('d'));

        let serve = CommandNode::new("Simulate the API Gateway and serves lambdas locally")
            .event("serve")
            .option(
                "port",
                CommandOption::optional("The local server port").shortcut('p'),
            );

        let webpack = CommandNode::new("Bundle with Webpack")
            .event("validate")
            .event("compile")
            .option(
                "out",
                CommandOption::optional("Path to output directory").shortcut('o'),
            )
            .command("invoke", invoke)
            .command("watch", watch)
            .command("serve", serve);

        let mut commands = IndexMap::new();
        commands.insert(ROOT_COMMAND.to_string(), webpack);
        Self(commands)
    }

    /// Look up a top-level command
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandNode> {
        self.0.get(name)
    }

    /// Follow a command path such as `["webpack", "watch"]`
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandNode> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.0.get(first.as_ref())?, |node, name| {
                node.commands.get(name.as_ref())
            })
    }

    /// Top-level commands in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CommandNode)> {
        self.0.iter()
    }

    /// Every lifecycle event name the tree raises, fully qualified
    /// (`webpack:watch:watch`), depth first
    #[must_use]
    pub fn qualified_events(&self) -> Vec<String> {
        fn walk(prefix: &str, node: &CommandNode, out: &mut Vec<String>) {
            for event in &node.lifecycle_events {
                out.push(format!("{prefix}:{event}"));
            }
            for (name, child) in &node.commands {
                walk(&format!("{prefix}:{name}"), child, out);
            }
        }

        let mut events = Vec::new();
        for (name, node) in &self.0 {
            walk(name, node, &mut events);
        }
        events
    }
}
