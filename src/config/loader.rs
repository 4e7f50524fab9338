// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{GenerationConfig, RawConfigFile};
use crate::errors::Result;

/// Read and deserialize a config file without validating it.
///
/// Use this when more values (CLI flags) still have to be layered on top;
/// otherwise use [`load_and_validate`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_str(&contents)
}

pub fn parse_str(contents: &str) -> Result<RawConfigFile> {
    let config: RawConfigFile = toml::from_str(contents)?;
    Ok(config)
}

pub fn load_and_validate(path: impl AsRef<Path>) -> Result<GenerationConfig> {
    let raw = load_from_path(path)?;
    GenerationConfig::try_from(raw)
}
