use super::error::{CommandError, DispatchError, TreeError};
use super::help::{HelpMode, leaf_line, render_help};
use super::params::{Args, ParameterSpec, Signature};
use super::tokenizer::{Tokens, tokenize};
use std::io::Write;
use tracing::debug;

/// Effect of a leaf: receives the session, its bound arguments and the
/// console output.
pub type Handler<C> = Box<dyn Fn(&mut C, &Args, &mut dyn Write) -> Result<(), CommandError>>;

pub const HELP_COMMAND: &str = "help";
const RECURSIVE_FLAG: &str = "-r";

enum Action<C> {
    /// Render the help of the group that owns this leaf
    Help,
    Run(Handler<C>),
}

/// A named operation with a fixed parameter shape
pub struct Command<C> {
    name: String,
    description: String,
    signature: Signature,
    action: Action<C>,
}

impl<C> Command<C> {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        params: Vec<ParameterSpec>,
        handler: F,
    ) -> Result<Self, TreeError>
    where
        F: Fn(&mut C, &Args, &mut dyn Write) -> Result<(), CommandError> + 'static,
    {
        Ok(Self {
            name: name.into(),
            description: description.into(),
            signature: Signature::new(params)?,
            action: Action::Run(Box::new(handler)),
        })
    }

    fn help() -> Self {
        Self {
            name: HELP_COMMAND.to_string(),
            description: "Show available commands, -r expands every group".to_string(),
            signature: Signature::new(vec![ParameterSpec::optional("flag")])
                .unwrap_or_default(),
            action: Action::Help,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    fn invoke(
        &self,
        owner: &CommandGroup<C>,
        owner_path: &str,
        ctx: &mut C,
        tokens: Tokens<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DispatchError> {
        let args = self
            .signature
            .bind(tokens)
            .map_err(|reason| DispatchError::Usage {
                usage: leaf_line(owner_path, self),
                reason,
            })?;

        match &self.action {
            Action::Help => {
                let mode = if args.get("flag") == Some(RECURSIVE_FLAG) {
                    HelpMode::Recursive
                } else {
                    HelpMode::Simple
                };
                owner.show_help(owner_path, mode, out)
            }
            Action::Run(handler) => {
                debug!(command = %qualify(owner_path, &self.name), "invoking");
                handler(ctx, &args, out).map_err(|source| DispatchError::Command {
                    command: qualify(owner_path, &self.name),
                    source,
                })
            }
        }
    }
}

/// Child of a command group
pub enum CommandNode<C> {
    Leaf(Command<C>),
    Group(CommandGroup<C>),
}

impl<C> CommandNode<C> {
    pub fn name(&self) -> &str {
        match self {
            CommandNode::Leaf(command) => command.name(),
            CommandNode::Group(group) => group.name(),
        }
    }
}

/// A namespace of commands, addressed by a single token
///
/// Children keep their insertion order, which is also the order help lists
/// them in. Every group starts out with a `help` leaf. The root of a tree is
/// a group with an empty name.
pub struct CommandGroup<C> {
    name: String,
    description: String,
    children: Vec<CommandNode<C>>,
}

impl<C> CommandGroup<C> {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            children: vec![CommandNode::Leaf(Command::help())],
        }
    }

    pub fn root() -> Self {
        Self::new("", "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    pub fn children(&self) -> &[CommandNode<C>] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&CommandNode<C>> {
        self.children.iter().find(|child| child.name() == name)
    }

    pub fn add_command(&mut self, command: Command<C>) -> Result<&mut Self, TreeError> {
        self.add_node(CommandNode::Leaf(command))
    }

    pub fn add_group(&mut self, group: CommandGroup<C>) -> Result<&mut Self, TreeError> {
        self.add_node(CommandNode::Group(group))
    }

    fn add_node(&mut self, node: CommandNode<C>) -> Result<&mut Self, TreeError> {
        if node.name().is_empty() || self.child(node.name()).is_some() {
            return Err(TreeError::DuplicateChild {
                parent: self.name.clone(),
                name: node.name().to_string(),
            });
        }
        self.children.push(node);
        Ok(self)
    }

    /// Tokenize one line and run the command it resolves to
    pub fn dispatch(&self, ctx: &mut C, line: &str, out: &mut dyn Write) -> Result<(), DispatchError> {
        self.dispatch_tokens(ctx, "", tokenize(line), out)
    }

    fn dispatch_tokens(
        &self,
        ctx: &mut C,
        prefix: &str,
        mut tokens: Tokens<'_>,
        out: &mut dyn Write,
    ) -> Result<(), DispatchError> {
        let path = qualify(prefix, &self.name);

        let Some(token) = tokens.next() else {
            return self.show_help(&path, HelpMode::Simple, out);
        };

        match self.child(&token) {
            None => Err(DispatchError::UnrecognizedCommand(token)),
            Some(CommandNode::Group(group)) => group.dispatch_tokens(ctx, &path, tokens, out),
            Some(CommandNode::Leaf(command)) => command.invoke(self, &path, ctx, tokens, out),
        }
    }

    fn show_help(&self, path: &str, mode: HelpMode, out: &mut dyn Write) -> Result<(), DispatchError> {
        out.write_all(render_help(self, path, mode).as_bytes())
            .map_err(|e| DispatchError::Command {
                command: qualify(path, HELP_COMMAND),
                source: CommandError::Io(e),
            })
    }
}

/// Join an ancestor path and a local name with a space
pub(crate) fn qualify(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix} {name}"),
    }
}
