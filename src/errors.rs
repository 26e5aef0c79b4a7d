use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableLoadingError {
    #[error("cannot read table from file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("malformed table file: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("duplicate rule phrase: {0:?}")]
    DuplicatePhrase(String),
    #[error("invalid entry {phrase:?}: {reason}")]
    InvalidEntry { phrase: String, reason: &'static str },
}

#[derive(Error, Debug)]
pub enum IndexSavingError {
    #[error("cannot write index into file: {0}")]
    WriteFile(#[from] std::io::Error),
    #[error("can't serialize index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A gazetteer backend could not answer a query.
#[derive(Error, Debug)]
#[error("gazetteer lookup unavailable: {0}")]
pub struct LookupError(pub String);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config from file: {0}")]
    ReadFile(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Deserialize(#[from] toml::de::Error),
}
