//! Configuration loading.
//!
//! Settings live in `.candidate-scoring.toml`, found by walking up from the
//! working directory. Every section is optional and invalid sections are
//! replaced by their defaults.

mod core;
mod loader;

pub use core::{CalibrationSection, ScoringConfig, ScoringSection};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};
