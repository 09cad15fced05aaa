use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifier assigned by the rule store
pub type RuleId = String;

/// Identifier of an output handle, unique within one session
pub type HandleId = usize;

pub const DEFAULT_TAG: &str = "...";

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

/// A named filter rule known to the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unset until the rule store has accepted the rule
    pub id: Option<RuleId>,
    pub name: String,
    /// Flattened filter text, as sent to the store
    pub expression: String,
    pub tag: String,
}

/// One entry of the rule store's listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRule {
    pub id: RuleId,
    #[serde(rename = "value")]
    pub text: String,
    #[serde(default = "default_tag")]
    pub tag: String,
}

/// A file output and the rules whose matches it receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handle {
    pub id: HandleId,
    pub name: String,
    pub file: PathBuf,
    /// Subscribed rule ids; empty means every rule
    pub rules: Vec<RuleId>,
}

impl Handle {
    pub fn receives_all(&self) -> bool {
        self.rules.is_empty()
    }
}
