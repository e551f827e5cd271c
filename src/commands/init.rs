use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE_NAME;

const DEFAULT_CONFIG: &str = r#"# candidate-scoring configuration

# Generation settings for library callers that pass `ScoringConfig::oracle`
# to `ResponseScorer::with_settings`. The command-line tool itself never calls
# the oracle, so it only validates this section.
[oracle]
# model = "your-model-id"
max_tokens = 1500
temperature = 0.2

[scoring]
# Used when a request names no vertical
# default_vertical = "software_engineering"

# Cohort statistics override or extend the built-in curves.
# [[calibration.curves]]
# vertical = "sales"
# role_type = "senior"
# mean = 6.8
# std_dev = 1.2
# hire_threshold = 7.5
# steepness = 1.5
"#;

/// Write the default config into `dir`, returning the written path
pub fn init_config(dir: &Path, force: bool) -> Result<std::path::PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, ScoringConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        assert_eq!(parse_config(DEFAULT_CONFIG).unwrap(), ScoringConfig::default());
    }

    #[test]
    fn test_oracle_section_is_marked_library_only() {
        let oracle_header = DEFAULT_CONFIG.find("[oracle]").unwrap();
        let note = &DEFAULT_CONFIG[..oracle_header];
        assert!(note.contains("ResponseScorer::with_settings"));
        assert!(note.contains("never calls"));
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        init_config(dir.path(), false).unwrap();
        assert!(init_config(dir.path(), false).is_err());
        assert!(init_config(dir.path(), true).is_ok());
    }
}
