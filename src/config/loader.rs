use std::fs;
use std::path::{Path, PathBuf};

use super::core::ScoringConfig;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".candidate-scoring.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse config from a TOML string; invalid sections fall back to defaults
pub fn parse_config(contents: &str) -> Result<ScoringConfig> {
    let config: ScoringConfig = toml::from_str(contents)?;
    Ok(config.sanitize())
}

/// Load an explicitly named config file. Unlike discovery, a missing or
/// malformed file is an error.
pub fn load_config_file(path: &Path) -> Result<ScoringConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents).map_err(|e| {
        Error::Configuration(format!("failed to load {}: {}", path.display(), e))
    })
}

fn try_load_config_from_path(config_path: &Path) -> Option<ScoringConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read config file {}: {}", config_path.display(), e);
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Failed to parse {}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

/// Directory and its ancestors, nearest first, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        parent.pop().then_some(parent)
    })
    .take(max_depth)
}

/// Search upward from `start` for the nearest config file
pub fn load_config_from(start: &Path) -> ScoringConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ScoringConfig::default()
        })
}

/// Search upward from the current directory for the nearest config file
pub fn load_config() -> ScoringConfig {
    match std::env::current_dir() {
        Ok(current) => load_config_from(&current),
        Err(e) => {
            tracing::warn!("Failed to get current directory: {}. Using default config.", e);
            ScoringConfig::default()
        }
    }
}
