use serde::{Deserialize, Serialize};

use crate::calibration::{CalibrationCurve, CalibrationTable};
use crate::oracle::OracleSettings;
use crate::scoring::verticals;

/// Root configuration structure for .candidate-scoring.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Generation settings for oracle prompts, applied by library callers
    /// through `ResponseScorer::with_settings`
    #[serde(default)]
    pub oracle: OracleSettings,

    #[serde(default)]
    pub scoring: ScoringSection,

    #[serde(default)]
    pub calibration: CalibrationSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringSection {
    /// Vertical used when a request names none
    #[serde(default)]
    pub default_vertical: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSection {
    /// Curves added to (or replacing) the built-in ones
    #[serde(default)]
    pub curves: Vec<CalibrationCurve>,
}

impl ScoringConfig {
    /// Built-in calibration curves overlaid with the configured ones
    pub fn calibration_table(&self) -> CalibrationTable {
        let mut table = CalibrationTable::default();
        table.extend(self.calibration.curves.iter().cloned());
        table
    }

    /// Configured default vertical in canonical form
    pub fn default_vertical(&self) -> Option<&'static str> {
        self.scoring
            .default_vertical
            .as_deref()
            .and_then(verticals::canonical_name)
    }

    /// Check every section, reporting all problems at once
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Err(e) = self.oracle.validate() {
            errors.push(e);
        }
        if let Some(name) = &self.scoring.default_vertical {
            if verticals::canonical_name(name).is_none() {
                errors.push(format!("unknown default_vertical '{name}'"));
            }
        }
        errors.extend(self.calibration.curves.iter().filter_map(|c| c.validate().err()));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Replace each invalid section with its default, logging what was dropped
    pub fn sanitize(mut self) -> Self {
        if let Err(e) = self.oracle.validate() {
            tracing::warn!("Invalid [oracle] settings: {}. Using defaults.", e);
            self.oracle = OracleSettings::default();
        }

        if let Some(name) = self.scoring.default_vertical.take() {
            match verticals::canonical_name(&name) {
                Some(canonical) => self.scoring.default_vertical = Some(canonical.to_string()),
                None => tracing::warn!("Unknown default_vertical '{}'. Ignoring it.", name),
            }
        }

        self.calibration.curves.retain(|curve| match curve.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Dropping calibration curve: {}", e);
                false
            }
        });

        self
    }
}
