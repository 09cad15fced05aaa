use super::error::{BindingFailure, CommandError, TreeError};

/// How a parameter consumes tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Exactly one token must be supplied
    Required,
    /// One token may be supplied; the default is used otherwise
    Optional(Option<String>),
    /// Absorbs every remaining token (possibly none)
    Variadic,
}

/// One declared parameter of a leaf command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParamKind,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Required,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Optional(None),
        }
    }

    pub fn optional_with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Optional(Some(default.into())),
        }
    }

    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Variadic,
        }
    }

    /// Usage fragment: `<name>`, `[opt: name]` or `[opt: name...]`
    pub fn usage(&self) -> String {
        match self.kind {
            ParamKind::Required => format!("<{}>", self.name),
            ParamKind::Optional(_) => format!("[opt: {}]", self.name),
            ParamKind::Variadic => format!("[opt: {}...]", self.name),
        }
    }
}

/// Validated, ordered parameter list of a leaf
///
/// Names are unique, and at most one parameter is variadic, in last position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<ParameterSpec>,
}

impl Signature {
    pub fn new(params: Vec<ParameterSpec>) -> Result<Self, TreeError> {
        for (index, param) in params.iter().enumerate() {
            if params[..index].iter().any(|p| p.name == param.name) {
                return Err(TreeError::InvalidSignature(format!(
                    "parameter '{}' declared twice",
                    param.name
                )));
            }
            if param.kind == ParamKind::Variadic && index + 1 != params.len() {
                return Err(TreeError::InvalidSignature(format!(
                    "variadic parameter '{}' must be last",
                    param.name
                )));
            }
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Space-separated usage fragments, empty when the leaf takes nothing
    pub fn usage(&self) -> String {
        self.params
            .iter()
            .map(ParameterSpec::usage)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Map tokens onto the declared parameters, left to right
    pub fn bind<I>(&self, tokens: I) -> Result<Args, BindingFailure>
    where
        I: IntoIterator<Item = String>,
    {
        let mut tokens = tokens.into_iter();
        let mut values = Vec::with_capacity(self.params.len());

        for param in &self.params {
            let value = match &param.kind {
                ParamKind::Required => match tokens.next() {
                    Some(token) => BoundValue::One(token),
                    None => return Err(BindingFailure::MissingArgument(param.name.clone())),
                },
                ParamKind::Optional(default) => match tokens.next() {
                    Some(token) => BoundValue::One(token),
                    None => match default {
                        Some(default) => BoundValue::One(default.clone()),
                        None => BoundValue::Absent,
                    },
                },
                ParamKind::Variadic => BoundValue::Many(tokens.by_ref().collect()),
            };
            values.push((param.name.clone(), value));
        }

        match tokens.next() {
            Some(extra) => Err(BindingFailure::UnexpectedArgument(extra)),
            None => Ok(Args { values }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BoundValue {
    One(String),
    Absent,
    Many(Vec<String>),
}

/// Arguments bound to a leaf's parameters, looked up by parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    values: Vec<(String, BoundValue)>,
}

impl Args {
    fn lookup(&self, name: &str) -> Option<&BoundValue> {
        self.values
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, value)| value)
    }

    /// Single-token value, `None` for an absent optional or unknown name
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.lookup(name)? {
            BoundValue::One(value) => Some(value),
            _ => None,
        }
    }

    /// Single-token value that the handler cannot do without
    pub fn require(&self, name: &str) -> Result<&str, CommandError> {
        self.get(name)
            .ok_or_else(|| CommandError::Invalid(format!("missing argument '{name}'")))
    }

    /// Tokens absorbed by a variadic parameter
    pub fn list(&self, name: &str) -> &[String] {
        match self.lookup(name) {
            Some(BoundValue::Many(values)) => values,
            _ => &[],
        }
    }
}
