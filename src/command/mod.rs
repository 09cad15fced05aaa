//! Command dispatch engine
//!
//! A console line is split by the [`tokenize`] stream, resolved against a
//! tree of [`CommandGroup`]s one token per level, and the remaining tokens
//! are bound to the target [`Command`]'s declared parameters.
//!
//! # Console grammar
//!
//! ```text
//! <group> [<group> ...] <leaf> <positional-arg>...
//! help [-r]                       list commands (-r expands every group)
//! handle rules add news r1 r2     nested groups resolve token by token
//! rules add cats "(OR cat kitten)"  quotes keep whitespace in one argument
//! ```

pub mod error;
pub mod help;
pub mod params;
pub mod tokenizer;
pub mod tree;

pub use error::{BindingFailure, CommandError, DispatchError, TreeError};
pub use help::{HelpMode, render_help};
pub use params::{Args, ParamKind, ParameterSpec, Signature};
pub use tokenizer::{Tokens, tokenize};
pub use tree::{Command, CommandGroup, CommandNode, HELP_COMMAND, Handler};
