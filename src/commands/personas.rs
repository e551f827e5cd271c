use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::config::ScoringConfig;
use crate::output;
use crate::scoring::persona::{self, PersonaScore};
use crate::scoring::response::score_from_payload;
use crate::scoring::ScoreResult;

pub struct PersonasConfig {
    pub score: PathBuf,
    pub vertical: Option<String>,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct PersonaReport<'a> {
    baseline: &'a ScoreResult,
    personas: &'a [PersonaScore],
}

/// Read a stored score result, or build one from a raw oracle scoring payload
pub fn read_score(path: &Path, vertical: Option<&str>) -> Result<ScoreResult> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read score {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Score {} is not valid JSON", path.display()))?;

    if let Ok(score) = serde_json::from_value::<ScoreResult>(value.clone()) {
        return Ok(score.normalized());
    }
    let payload = value
        .as_object()
        .with_context(|| format!("Score {} must be a JSON object", path.display()))?;
    Ok(score_from_payload(payload, vertical))
}

pub fn simulate_personas<W: Write>(
    config: PersonasConfig,
    settings: &ScoringConfig,
    out: &mut W,
) -> Result<()> {
    let requested = config
        .vertical
        .as_deref()
        .or(settings.default_vertical());
    let score = read_score(&config.score, requested)?;
    let vertical = requested.or(score.vertical.as_deref());

    let personas = persona::simulate_all(&score, vertical);
    match config.format {
        OutputFormat::Json => output::write_json(
            out,
            &PersonaReport {
                baseline: &score,
                personas: &personas,
            },
        )?,
        OutputFormat::Text => output::write_personas(out, &score, &personas)?,
    }
    Ok(())
}
