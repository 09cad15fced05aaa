use crate::rules::DEFAULT_TAG;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Printed before every interactive input line.
    pub prompt: String,
    /// Tag given to rules added without one.
    pub default_tag: String,
    /// Prefix of generated rule names (`Rule0`, `Rule1`, ...).
    pub rule_name_prefix: String,
    /// Maximum number of rules the store accepts; `0` means no cap.
    pub rule_cap: Option<usize>,
    /// Rule listing the store starts from.
    pub seed: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: ">>>>>>>> ".to_string(),
            default_tag: DEFAULT_TAG.to_string(),
            rule_name_prefix: "Rule".to_string(),
            rule_cap: Some(25),
            seed: None,
        }
    }
}

impl ConsoleConfig {
    /// The cap to enforce, `None` when unset or `0`
    pub fn effective_rule_cap(&self) -> Option<usize> {
        self.rule_cap.filter(|&cap| cap > 0)
    }
}

pub fn load_config(path: Option<&Path>) -> Result<ConsoleConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<ConsoleConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static ConsoleConfig {
    static DEFAULT_CONFIG: LazyLock<ConsoleConfig> = LazyLock::new(ConsoleConfig::default);
    &DEFAULT_CONFIG
}
