use super::entities::{RemoteRule, RuleId};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors reported by a rule store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Couldn't add rule, invalid syntax: {0}")]
    InvalidRule(String),

    #[error("A duplicate was found, rule not added: '{0}'")]
    DuplicateRule(String),

    #[error("Rules cap of {0} exceeded, delete a rule before adding another")]
    CapExceeded(usize),

    #[error("No rule with id '{0}' in the store")]
    UnknownRule(RuleId),

    #[error("Failed to read rule listing '{path}': {source}")]
    SeedRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rule listing '{path}': {source}")]
    SeedParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The remote side that owns rule ids
///
/// Transport, retries and authentication are the implementation's concern.
pub trait RuleStore {
    fn list(&self) -> Result<Vec<RemoteRule>, StoreError>;
    fn add(&mut self, text: &str, tag: &str) -> Result<RuleId, StoreError>;
    fn delete(&mut self, id: &str) -> Result<(), StoreError>;
    fn delete_all(&mut self) -> Result<(), StoreError>;
}

/// In-process rule store with sequential ids
#[derive(Debug, Clone)]
pub struct MemoryStore {
    rules: Vec<RemoteRule>,
    next_id: u64,
    cap: Option<usize>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            next_id: 1,
            cap: None,
        }
    }

    pub fn with_cap(mut self, cap: Option<usize>) -> Self {
        self.cap = cap;
        self
    }

    /// Start from an existing listing; new ids continue after the highest
    /// numeric id in it
    pub fn from_listing(rules: Vec<RemoteRule>) -> Self {
        let next_id = rules
            .iter()
            .filter_map(|rule| rule.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            rules,
            next_id,
            cap: None,
        }
    }

    /// Load a JSON listing (`[{"id", "value", "tag"}]`) written by hand or
    /// exported from the remote store
    pub fn load_seed(path: &Path) -> Result<Self, StoreError> {
        let path_display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| StoreError::SeedRead {
            path: path_display.clone(),
            source,
        })?;
        let rules: Vec<RemoteRule> =
            serde_json::from_str(&raw).map_err(|source| StoreError::SeedParse {
                path: path_display,
                source,
            })?;
        Ok(Self::from_listing(rules))
    }
}

impl RuleStore for MemoryStore {
    fn list(&self) -> Result<Vec<RemoteRule>, StoreError> {
        Ok(self.rules.clone())
    }

    fn add(&mut self, text: &str, tag: &str) -> Result<RuleId, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::InvalidRule("empty rule".to_string()));
        }
        if self.rules.iter().any(|rule| rule.text == text) {
            return Err(StoreError::DuplicateRule(text.to_string()));
        }
        if let Some(cap) = self.cap {
            if self.rules.len() >= cap {
                return Err(StoreError::CapExceeded(cap));
            }
        }

        let id = self.next_id.to_string();
        self.next_id += 1;
        debug!(%id, text, "store accepted rule");
        self.rules.push(RemoteRule {
            id: id.clone(),
            text: text.to_string(),
            tag: tag.to_string(),
        });
        Ok(id)
    }

    fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let index = self
            .rules
            .iter()
            .position(|rule| rule.id == id)
            .ok_or_else(|| StoreError::UnknownRule(id.to_string()))?;
        self.rules.remove(index);
        Ok(())
    }

    fn delete_all(&mut self) -> Result<(), StoreError> {
        self.rules.clear();
        Ok(())
    }
}
