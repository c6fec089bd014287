//! Loading catalogs and engine constants from disk

mod catalog;
mod constants;

pub use catalog::load_catalog;
pub use constants::{CritConstants, DebuffRule, EngineConstants, ResistanceConstants};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to load a catalog or the engine constants
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no catalog format for {0}; expected .json or .toml")]
    UnsupportedFormat(PathBuf),
    /// Well-formed, but the engine cannot use the values
    #[error("invalid data: {0}")]
    Invalid(String),
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize a TOML file
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    parse_toml(&read_file(path)?)
}

/// Deserialize TOML text
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load engine constants from a TOML file and validate them
pub fn load_constants(path: &Path) -> Result<EngineConstants, ConfigError> {
    let constants: EngineConstants = load_toml(path)?;
    constants.validate()?;
    Ok(constants)
}
