use anyhow::Result;
use std::io::Write;

use crate::calibration::Calibrator;
use crate::cli::OutputFormat;
use crate::config::ScoringConfig;
use crate::output;

pub struct CalibrateConfig {
    pub score: f64,
    pub vertical: Option<String>,
    pub role: Option<String>,
    pub format: OutputFormat,
}

pub fn calibrate_score<W: Write>(
    config: CalibrateConfig,
    settings: &ScoringConfig,
    out: &mut W,
) -> Result<()> {
    if !config.score.is_finite() {
        anyhow::bail!("Score must be a finite number, got {}", config.score);
    }

    let vertical = config.vertical.as_deref().or(settings.default_vertical());
    let calibrator = Calibrator::new(settings.calibration_table());
    let result = calibrator.calibrate(config.score, vertical, config.role.as_deref());

    match config.format {
        OutputFormat::Json => output::write_json(out, &result)?,
        OutputFormat::Text => output::write_calibration(out, &result)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::CalibrationCurve;
    use serde_json::Value;

    fn run(config: CalibrateConfig, settings: &ScoringConfig) -> Result<Value> {
        let mut out = Vec::new();
        calibrate_score(config, settings, &mut out)?;
        Ok(serde_json::from_slice(&out)?)
    }

    #[test]
    fn test_configured_curve_is_used() {
        let mut settings = ScoringConfig::default();
        settings
            .calibration
            .curves
            .push(CalibrationCurve::new("sales", "senior", 7.0, 1.0, 8.0));

        let result = run(
            CalibrateConfig {
                score: 7.0,
                vertical: Some("sales".into()),
                role: Some("Staff".into()),
                format: OutputFormat::Json,
            },
            &settings,
        )
        .unwrap();
        assert_eq!(result["curve"], "sales/senior");
        assert_eq!(result["calibrated_score"], 5.0);
    }

    #[test]
    fn test_default_vertical_applies() {
        let mut settings = ScoringConfig::default();
        settings
            .calibration
            .curves
            .push(CalibrationCurve::new("design", "*", 5.0, 1.0, 6.0));
        settings.scoring.default_vertical = Some("design".into());

        let result = run(
            CalibrateConfig {
                score: 5.0,
                vertical: None,
                role: None,
                format: OutputFormat::Json,
            },
            &settings,
        )
        .unwrap();
        assert_eq!(result["curve"], "design/*");
    }

    #[test]
    fn test_nan_score_rejected() {
        let config = CalibrateConfig {
            score: f64::NAN,
            vertical: None,
            role: None,
            format: OutputFormat::Text,
        };
        assert!(run(config, &ScoringConfig::default()).is_err());
    }
}
