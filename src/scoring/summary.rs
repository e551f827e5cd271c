//! Interview-level aggregation.
//!
//! [`SummaryAggregator`] asks the oracle for a narrative summary and a
//! recommendation once every answer has been scored. [`calculate_overall_score`]
//! is the oracle-free aggregate over the same scores.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, info_span, warn, Instrument};

use super::response::ScoreResult;
use super::score_normalizer::{clamp_score, convert, numeric, ORACLE_SCALE};
use crate::errors::Result;
use crate::oracle::payload::{extract_object, string_list, text};
use crate::oracle::{prompts, Oracle, OracleSettings};

const STAGE: &str = "interview summary";

/// Job the interview was held for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobContext {
    pub job_title: String,
    #[serde(default)]
    pub job_requirements: Vec<String>,
    #[serde(default)]
    pub vertical: Option<String>,
}

/// One answered question together with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResponse {
    pub question: String,
    pub transcript: String,
    pub score: ScoreResult,
}

/// Closed recommendation vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Advance,
    #[default]
    Maybe,
    Reject,
}

impl Recommendation {
    /// Normalise free oracle text; anything outside the vocabulary is `Maybe`
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "advance" => Recommendation::Advance,
            "reject" => Recommendation::Reject,
            _ => Recommendation::Maybe,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::Advance => "advance",
            Recommendation::Maybe => "maybe",
            Recommendation::Reject => "reject",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub total_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub recommendation: Recommendation,
}

impl InterviewSummary {
    fn empty() -> Self {
        Self {
            total_score: 0.0,
            summary: "No responses were recorded for this interview.".to_string(),
            strengths: Vec::new(),
            concerns: Vec::new(),
            recommendation: Recommendation::Maybe,
        }
    }
}

/// Arithmetic mean of the overall scores, bounded to the canonical scale;
/// an empty slice scores 0
pub fn calculate_overall_score(scores: &[ScoreResult]) -> f64 {
    mean_overall(scores.iter())
}

fn mean_overall<'a>(scores: impl Iterator<Item = &'a ScoreResult>) -> f64 {
    let (count, total) = scores.fold((0usize, 0.0), |(n, sum), s| (n + 1, sum + s.overall));
    if count == 0 {
        0.0
    } else {
        // Scores may arrive deserialized rather than normalized
        clamp_score(Some(total / count as f64))
    }
}

/// Turn a recovered oracle object into a bounded summary.
///
/// A missing `total_score` falls back to the mean of the per-answer scores.
pub fn summary_from_payload(payload: &Map<String, Value>, responses: &[ScoredResponse]) -> InterviewSummary {
    let total_score = match payload.get("total_score") {
        Some(value) => convert(numeric(value), ORACLE_SCALE),
        None => mean_overall(responses.iter().map(|r| &r.score)),
    };

    let recommendation = payload
        .get("recommendation")
        .and_then(Value::as_str)
        .map(Recommendation::normalize)
        .unwrap_or_default();

    InterviewSummary {
        total_score,
        summary: text(payload.get("summary")),
        strengths: string_list(payload.get("overall_strengths")),
        concerns: string_list(payload.get("overall_concerns")),
        recommendation,
    }
}

/// Produces the interview summary with a single oracle call
pub struct SummaryAggregator<O> {
    oracle: O,
    settings: OracleSettings,
}

impl<O: Oracle> SummaryAggregator<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_settings(oracle, OracleSettings::default())
    }

    pub fn with_settings(oracle: O, settings: OracleSettings) -> Self {
        Self { oracle, settings }
    }

    /// Summarise an interview from all of its scored responses.
    ///
    /// Callers must join every per-answer score first; the prompt embeds them all.
    pub async fn summarize(&self, responses: &[ScoredResponse], job: &JobContext) -> Result<InterviewSummary> {
        if responses.is_empty() {
            debug!("no responses to summarise, skipping oracle call");
            return Ok(InterviewSummary::empty());
        }

        let prompt = prompts::summary_prompt(responses, job, &self.settings);
        let span = info_span!("summarize_interview", responses = responses.len());
        let content = self.oracle.complete(&prompt).instrument(span).await?;

        let payload = extract_object(&content, STAGE).inspect_err(|e| {
            warn!(error = %e, "discarding unparseable summary reply");
        })?;
        let summary = summary_from_payload(&payload, responses);
        debug!(
            total_score = summary.total_score,
            recommendation = %summary.recommendation,
            "summarised interview"
        );
        Ok(summary)
    }
}
