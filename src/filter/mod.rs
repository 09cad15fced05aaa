//! Filter expression compiling
//!
//! Operators write rules as nested, parenthesized groups. This module turns
//! that text into an [`ExpressionNode`] tree and flattens the tree into the
//! compact text the search grammar downstream understands.
//!
//! # Syntax
//!
//! ```text
//! term                 A single atom, passed through verbatim
//! "exact phrase"       Quotes keep whitespace inside one atom
//! (a b c)              Group without operator: AND
//! (AND a b)            Explicit AND
//! (OR a b)             Any of the children
//! (- a b)              Negates every child: -a -b
//! a\ b                 Backslash makes the next character literal
//! ```
//!
//! # Examples
//!
//! ```text
//! (OR cat kitten)                  cat OR kitten
//! (news (OR rust go))              news (rust OR go)
//! (OR "happy birthday" (- cake))   "happy birthday" OR -cake
//! ```

pub mod error;
pub mod expr;
pub mod parser;
pub mod serializer;

pub use error::FilterParseError;
pub use expr::{ExpressionNode, compile};
pub use parser::{Sexp, parse_sexp};
pub use serializer::serialize;
