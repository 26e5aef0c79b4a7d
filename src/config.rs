use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::builder::DEFAULT_MAX_WORDS;
use crate::errors::ConfigError;

/// Settings read from a TOML file. Every key is optional.
///
/// ```toml
/// rules = "rules.json"
/// index = "gazetteer.json"
/// max_words = 5
/// min_importance = 0
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rule file; the built-in rule table is used when absent.
    pub rules: Option<PathBuf>,
    /// Gazetteer index; only rules apply when absent.
    pub index: Option<PathBuf>,
    /// Longest name kept when building an index.
    pub max_words: usize,
    /// Least important name kept when building an index.
    pub min_importance: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: None,
            index: None,
            max_words: DEFAULT_MAX_WORDS,
            min_importance: 0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let string = fs::read_to_string(path)?;
        Self::from_toml(&string)
    }

    pub fn from_toml(string: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(string)?)
    }
}
