use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::allocation::NamingRules;

pub const DEFAULT_LOG_FILTER:&str = "deadlock_sim=info,warn";

#[derive(Error,Debug)]
pub enum ConfigError {
    #[error("could not read config file {path:?}")]
    Io{path:PathBuf,#[source] source:std::io::Error},
    #[error("could not parse config")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone,Debug,PartialEq,Eq,Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    // RUST_LOG takes precedence
    pub filter:String
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {filter:DEFAULT_LOG_FILTER.to_owned()}
    }
}

// every field is optional, an empty file gives the defaults
#[derive(Clone,Debug,Default,PartialEq,Eq,Deserialize)]
#[serde(default,deny_unknown_fields)]
pub struct Config {
    pub naming:NamingRules,
    pub logging:LoggingConfig
}

impl Config {
    pub fn load(path:&Path) -> Result<Self,ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        Self::parse(&text)
    }

    pub fn parse(text:&str) -> Result<Self,ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
