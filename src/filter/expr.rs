use super::error::FilterParseError;
use super::parser::{Sexp, parse_sexp};
use super::serializer::serialize;
use std::fmt;

pub const AND_OPERATOR: &str = "AND";
pub const OR_OPERATOR: &str = "OR";
pub const NOT_OPERATOR: &str = "-";

/// Boolean structure of one filter rule
///
/// Operator nodes always hold at least one child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionNode {
    Term(String),
    And(Vec<ExpressionNode>),
    Or(Vec<ExpressionNode>),
    /// Negates every child independently
    Not(Vec<ExpressionNode>),
}

impl ExpressionNode {
    pub fn term(text: impl Into<String>) -> Self {
        ExpressionNode::Term(text.into())
    }

    /// Parse operator text such as `(OR cat (- dog))`
    pub fn parse(text: &str) -> Result<Self, FilterParseError> {
        Self::from_sexp(parse_sexp(text)?)
    }

    /// Give a parsed structure its boolean meaning
    ///
    /// A group whose first atom is `AND`, `OR` or `-` applies that operator
    /// to the rest of the group; any other group is an implicit AND.
    pub fn from_sexp(sexp: Sexp) -> Result<Self, FilterParseError> {
        let mut items = match sexp {
            Sexp::Atom(text) => return Ok(ExpressionNode::Term(text)),
            Sexp::Group(items) => items,
        };

        let leading = items
            .first()
            .and_then(Sexp::as_atom)
            .and_then(Operator::from_atom);
        let operator = match leading {
            Some(operator) => {
                let head = items.remove(0);
                if items.is_empty() {
                    return Err(FilterParseError::MissingOperands(head.to_string()));
                }
                operator
            }
            None => Operator::And,
        };

        let children = items
            .into_iter()
            .map(Self::from_sexp)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(operator.build(children))
    }

    /// True for an AND/OR with more than one child
    pub fn is_compound(&self) -> bool {
        match self {
            ExpressionNode::And(children) | ExpressionNode::Or(children) => children.len() > 1,
            _ => false,
        }
    }

    /// Flattened text for the downstream search grammar
    pub fn to_filter_text(&self) -> String {
        serialize(self)
    }
}

#[derive(Debug, Clone, Copy)]
enum Operator {
    And,
    Or,
    Not,
}

impl Operator {
    fn from_atom(atom: &str) -> Option<Self> {
        match atom {
            AND_OPERATOR => Some(Operator::And),
            OR_OPERATOR => Some(Operator::Or),
            NOT_OPERATOR => Some(Operator::Not),
            _ => None,
        }
    }

    fn build(self, children: Vec<ExpressionNode>) -> ExpressionNode {
        match self {
            Operator::And => ExpressionNode::And(children),
            Operator::Or => ExpressionNode::Or(children),
            Operator::Not => ExpressionNode::Not(children),
        }
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

/// Parse operator text and flatten it in one step
pub fn compile(text: &str) -> Result<String, FilterParseError> {
    ExpressionNode::parse(text).map(|node| node.to_filter_text())
}
