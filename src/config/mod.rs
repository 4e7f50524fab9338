// src/config/mod.rs

//! Generation config: the TOML model (`model.rs`), file loading
//! (`loader.rs`) and validation into a [`GenerationConfig`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{
    CostSection, GenerationConfig, OutputSection, RawConfigFile, WorkflowSection,
    DEFAULT_OUTPUT_DIR,
};
