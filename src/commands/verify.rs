use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::output;
use crate::verification::{self, ParsedTranscript, PdfMetadata, TranscriptInput, VerifyOptions};

pub struct VerifyConfig {
    pub transcript: PathBuf,
    pub metadata: Option<PathBuf>,
    pub graduation_year: Option<i32>,
    pub as_of: Option<NaiveDate>,
    pub format: OutputFormat,
}

/// Read a transcript file holding either a full verifier input or a bare
/// parsed transcript
pub fn read_transcript_input(path: &Path) -> Result<TranscriptInput> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Transcript {} is not valid JSON", path.display()))?;

    let input = if value.get("parsed_transcript").is_some() {
        serde_json::from_value(value)?
    } else {
        TranscriptInput {
            parsed_transcript: serde_json::from_value::<ParsedTranscript>(value)?,
            pdf_metadata: None,
        }
    };
    Ok(input)
}

fn read_metadata(path: &Path) -> Result<PdfMetadata> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Metadata {} is not a JSON object", path.display()))
}

pub fn verify_transcript<W: Write>(config: VerifyConfig, out: &mut W) -> Result<()> {
    let mut input = read_transcript_input(&config.transcript)?;
    if let Some(path) = &config.metadata {
        input.pdf_metadata = Some(read_metadata(path)?);
    }

    let mut options = VerifyOptions::default().with_graduation_year(config.graduation_year);
    if let Some(date) = config.as_of {
        options.reference_date = date;
    }

    let result = verification::verify_with(&input, &options);
    match config.format {
        OutputFormat::Json => output::write_json(out, &result)?,
        OutputFormat::Text => output::write_verification(out, &result)?,
    }
    Ok(())
}
