use super::error::FilterParseError;
use std::fmt;

/// Untyped parse result: atoms and parenthesized groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sexp {
    Atom(String),
    Group(Vec<Sexp>),
}

impl Sexp {
    pub fn atom(text: impl Into<String>) -> Self {
        Sexp::Atom(text.into())
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Sexp::Atom(text) => Some(text),
            Sexp::Group(_) => None,
        }
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Atom(text) => write!(f, "{text}"),
            Sexp::Group(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Group under construction, remembering where its `(` was
struct OpenGroup {
    start: usize,
    items: Vec<Sexp>,
}

/// Parse parenthesized, quoted filter text into nested atoms and groups
///
/// Quoted spans stay a single atom and keep their quote characters, since
/// the downstream grammar reads them as exact phrases. Outside quotes a
/// backslash makes the next character literal and is dropped. Several
/// top-level items form an implicit group.
pub fn parse_sexp(input: &str) -> Result<Sexp, FilterParseError> {
    let mut stack: Vec<OpenGroup> = Vec::new();
    let mut top: Vec<Sexp> = Vec::new();
    let mut atom = String::new();
    let mut quote: Option<(char, usize)> = None;
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        if let Some((open, _)) = quote {
            atom.push(c);
            if c == '\\' {
                if let Some((_, escaped)) = chars.next() {
                    atom.push(escaped);
                }
            } else if c == open {
                quote = None;
            }
            continue;
        }

        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    atom.push(escaped);
                }
            }
            '"' | '\'' => {
                atom.push(c);
                quote = Some((c, i));
            }
            '(' => {
                flush(&mut atom, &mut stack, &mut top);
                stack.push(OpenGroup {
                    start: i,
                    items: Vec::new(),
                });
            }
            ')' => {
                flush(&mut atom, &mut stack, &mut top);
                let group = stack
                    .pop()
                    .ok_or_else(|| FilterParseError::UnmatchedClose(input[i..].to_string()))?;
                if group.items.is_empty() {
                    return Err(FilterParseError::EmptyGroup(
                        input[group.start..=i].to_string(),
                    ));
                }
                push_item(Sexp::Group(group.items), &mut stack, &mut top);
            }
            c if c.is_whitespace() => flush(&mut atom, &mut stack, &mut top),
            c => atom.push(c),
        }
    }

    if let Some((_, start)) = quote {
        return Err(FilterParseError::UnterminatedQuote(input[start..].to_string()));
    }
    if let Some(group) = stack.first() {
        return Err(FilterParseError::UnclosedGroup(input[group.start..].to_string()));
    }
    flush(&mut atom, &mut stack, &mut top);

    match top.len() {
        0 => Err(FilterParseError::Empty),
        1 => Ok(top.remove(0)),
        _ => Ok(Sexp::Group(top)),
    }
}

fn flush(atom: &mut String, stack: &mut [OpenGroup], top: &mut Vec<Sexp>) {
    if !atom.is_empty() {
        push_item(Sexp::Atom(std::mem::take(atom)), stack, top);
    }
}

fn push_item(item: Sexp, stack: &mut [OpenGroup], top: &mut Vec<Sexp>) {
    match stack.last_mut() {
        Some(group) => group.items.push(item),
        None => top.push(item),
    }
}
