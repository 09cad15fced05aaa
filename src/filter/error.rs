use thiserror::Error;

/// Errors that can occur when parsing filter expressions
///
/// Every variant is a malformed expression and carries the offending
/// fragment of the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("Malformed expression: unmatched ')' at '{0}'")]
    UnmatchedClose(String),

    #[error("Malformed expression: group never closed: '{0}'")]
    UnclosedGroup(String),

    #[error("Malformed expression: unterminated quote: {0}")]
    UnterminatedQuote(String),

    #[error("Malformed expression: empty group at '{0}'")]
    EmptyGroup(String),

    #[error("Malformed expression: operator '{0}' has no operands")]
    MissingOperands(String),

    #[error("Malformed expression: nothing to parse")]
    Empty,
}

impl FilterParseError {
    /// The part of the input the error points at
    pub fn fragment(&self) -> &str {
        match self {
            FilterParseError::UnmatchedClose(fragment)
            | FilterParseError::UnclosedGroup(fragment)
            | FilterParseError::UnterminatedQuote(fragment)
            | FilterParseError::EmptyGroup(fragment)
            | FilterParseError::MissingOperands(fragment) => fragment,
            FilterParseError::Empty => "",
        }
    }
}
