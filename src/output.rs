//! Rendering of command results as terminal text or JSON.

use colored::*;
use serde::Serialize;
use std::io::{self, Write};

use crate::calibration::CalibrationResult;
use crate::scoring::{Dimension, PersonaScore, ScoreResult, VerticalConfig};
use crate::verification::{Severity, VerificationResult, VerificationStatus};

/// Pretty JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}

fn status_label(status: VerificationStatus) -> ColoredString {
    let label = status.as_str().to_uppercase();
    match status {
        VerificationStatus::Verified => label.as_str().green().bold(),
        VerificationStatus::Warning => label.as_str().yellow().bold(),
        VerificationStatus::Suspicious => label.as_str().red().bold(),
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("{:<6}", severity.as_str());
    match severity {
        Severity::High => label.as_str().red(),
        Severity::Medium => label.as_str().yellow(),
        Severity::Low => label.as_str().normal(),
    }
}

pub fn write_verification<W: Write>(writer: &mut W, result: &VerificationResult) -> io::Result<()> {
    writeln!(writer, "{}", "Transcript Verification".bold().blue())?;
    writeln!(writer, "{}", "=======================".blue())?;
    writeln!(
        writer,
        "  Status: {}  Confidence: {}/100",
        status_label(result.status),
        result.confidence_score
    )?;
    writeln!(writer, "  Checks: {}", result.checks_run.join(", "))?;
    writeln!(writer)?;

    if result.flags.is_empty() {
        writeln!(writer, "  {} No flags raised", "✓".green())?;
    } else {
        writeln!(writer, "{}", "Flags:".bold())?;
        for flag in &result.flags {
            writeln!(
                writer,
                "  [{}] {:<28} {}",
                severity_label(flag.severity),
                flag.code,
                flag.message
            )?;
        }
    }
    writeln!(writer)?;
    writeln!(writer, "{}", result.summary)
}

pub fn write_calibration<W: Write>(writer: &mut W, result: &CalibrationResult) -> io::Result<()> {
    writeln!(writer, "{}", "Score Calibration".bold().blue())?;
    writeln!(writer, "{}", "=================".blue())?;
    writeln!(writer, "  Curve:            {}", result.curve)?;
    writeln!(writer, "  Raw score:        {:.2}", result.raw_score)?;
    writeln!(
        writer,
        "  Calibrated score: {}",
        format!("{:.2}", result.calibrated_score).as_str().bold()
    )?;
    writeln!(writer, "  Percentile:       {:.1}", result.percentile)?;
    writeln!(writer, "  Hire probability: {:.1}%", result.hire_probability * 100.0)?;
    writeln!(writer)?;
    writeln!(writer, "{}", result.interpretation)
}

pub fn write_personas<W: Write>(
    writer: &mut W,
    score: &ScoreResult,
    personas: &[PersonaScore],
) -> io::Result<()> {
    writeln!(writer, "{}", "Persona Simulation".bold().blue())?;
    writeln!(writer, "{}", "==================".blue())?;
    writeln!(
        writer,
        "  Baseline overall: {:.2} ({})",
        score.overall,
        score.vertical.as_deref().unwrap_or("uniform weights")
    )?;
    writeln!(writer)?;
    for persona in personas {
        let delta = format!("{:+.2}", persona.delta_from_baseline);
        let delta = if persona.delta_from_baseline > 0.0 {
            delta.as_str().green()
        } else if persona.delta_from_baseline < 0.0 {
            delta.as_str().red()
        } else {
            delta.as_str().normal()
        };
        writeln!(writer, "  {:<18} {:>5.2}  {}", persona.persona, persona.overall, delta)?;
    }
    Ok(())
}

pub fn write_verticals<'a, W: Write>(
    writer: &mut W,
    verticals: impl IntoIterator<Item = &'a VerticalConfig>,
) -> io::Result<()> {
    writeln!(writer, "{}", "Verticals".bold().blue())?;
    writeln!(writer, "{}", "=========".blue())?;
    let header: Vec<String> = Dimension::ALL.iter().map(|d| format!("{:>7}", abbreviate(*d))).collect();
    writeln!(writer, "  {:<24}{}", "", header.join(""))?;
    for vertical in verticals {
        let weights: Vec<String> = vertical
            .weights
            .iter()
            .map(|(_, w)| format!("{w:>7.2}"))
            .collect();
        writeln!(writer, "  {:<24}{}", vertical.name, weights.join(""))?;
    }
    Ok(())
}

fn abbreviate(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Communication => "comm",
        Dimension::ProblemSolving => "prob",
        Dimension::DomainKnowledge => "domain",
        Dimension::Motivation => "motiv",
        Dimension::CultureFit => "culture",
    }
}
