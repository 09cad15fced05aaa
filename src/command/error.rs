use thiserror::Error;

/// Token shape mismatch against a leaf's declared parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingFailure {
    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

/// Errors raised while building a command tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("duplicate command '{name}' in '{parent}'")]
    DuplicateChild { parent: String, name: String },

    #[error("invalid parameter list: {0}")]
    InvalidSignature(String),
}

/// Failure reported by a leaf's handler
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Filter(#[from] crate::filter::FilterParseError),

    #[error(transparent)]
    Store(#[from] crate::rules::StoreError),

    #[error(transparent)]
    Sink(#[from] crate::sink::SinkError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outcome of a line that could not be carried out
///
/// All variants are recoverable: the console reports them and reads the
/// next line.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("sorry, I don't recognize '{0}' as a command")]
    UnrecognizedCommand(String),

    #[error("Incorrect usage: {usage} ({reason})")]
    Usage {
        usage: String,
        reason: BindingFailure,
    },

    #[error("{command}: {source}")]
    Command {
        command: String,
        #[source]
        source: CommandError,
    },
}
