//! Per-answer scoring through the oracle.
//!
//! One oracle call per answer. Everything numeric in the reply is pushed
//! through the normalizer, so a [`ScoreResult`] is bounded to the canonical
//! scale regardless of what the oracle returned. The only failure is a reply
//! that is not structured data at all.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info_span, warn, Instrument};

use super::dimensions::{Dimension, DimensionScores};
use super::score_normalizer::{
    clamp, convert, convert_value, numeric, ORACLE_SCALE, SCALE_MAX, SCALE_MIN,
};
use super::verticals;
use crate::errors::Result;
use crate::oracle::payload::{extract_object, object, string_list, text};
use crate::oracle::{prompts, Oracle, OracleSettings};

/// Version tag stamped on every score so stored results can be re-derived
pub const ALGORITHM_VERSION: &str = "rubric-weighted-v2";

/// Oracle-scale value assumed for a dimension the oracle left out
pub const MISSING_DIMENSION_DEFAULT: f64 = 50.0;

const STAGE: &str = "response scoring";

/// One interview answer to be scored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    pub question: String,
    pub transcript: String,
    pub job_title: String,
    #[serde(default)]
    pub job_requirements: Vec<String>,
    #[serde(default)]
    pub vertical: Option<String>,
}

/// Where the overall score came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallSource {
    /// The oracle's own `overall_score`
    Oracle,
    /// Vertical-weighted combination of the dimension scores
    #[default]
    Weighted,
}

/// Bounded score of one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(flatten)]
    pub dimensions: DimensionScores,
    pub overall: f64,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub highlight_quotes: Vec<String>,
    #[serde(default = "default_algorithm_version")]
    pub algorithm_version: String,
    /// Canonical vertical whose weights were used, if one resolved
    #[serde(default)]
    pub vertical: Option<String>,
    #[serde(default)]
    pub overall_source: OverallSource,
}

fn default_algorithm_version() -> String {
    ALGORITHM_VERSION.to_string()
}

impl ScoreResult {
    /// Build a score from canonical dimension values, deriving the overall
    /// from the vertical's weights
    pub fn from_dimensions(dimensions: DimensionScores, vertical: Option<&str>) -> Self {
        let dimensions = DimensionScores::from_fn(|d| clamp(dimensions.get(d), SCALE_MIN, SCALE_MAX));
        Self {
            overall: verticals::weights_for(vertical).combine(&dimensions),
            dimensions,
            analysis: String::new(),
            strengths: Vec::new(),
            concerns: Vec::new(),
            highlight_quotes: Vec::new(),
            algorithm_version: default_algorithm_version(),
            vertical: vertical.and_then(verticals::canonical_name).map(str::to_string),
            overall_source: OverallSource::Weighted,
        }
    }

    /// Re-bound a score that did not come through the normalizer, such as one
    /// read back from storage
    pub fn normalized(mut self) -> Self {
        let dimensions = self.dimensions;
        self.dimensions = DimensionScores::from_fn(|d| clamp(dimensions.get(d), SCALE_MIN, SCALE_MAX));
        self.overall = clamp(self.overall, SCALE_MIN, SCALE_MAX);
        self
    }

    /// Whether every numeric field lies on the canonical scale
    pub fn is_bounded(&self) -> bool {
        let in_range = |v: f64| (SCALE_MIN..=SCALE_MAX).contains(&v);
        in_range(self.overall) && self.dimensions.iter().all(|(_, v)| in_range(v))
    }
}

/// Turn a recovered oracle object into a bounded score.
///
/// Absent dimensions default to the midpoint; present but non-numeric
/// values clamp to zero. `overall_score` wins when numeric, otherwise the
/// overall is the vertical-weighted combination of the dimensions.
pub fn score_from_payload(payload: &Map<String, Value>, vertical: Option<&str>) -> ScoreResult {
    let scores = object(payload.get("scores"));
    let dimensions = DimensionScores::from_fn(|dimension| dimension_score(scores, dimension));

    let weights = verticals::weights_for(vertical);
    let (overall, overall_source) = match payload.get("overall_score").and_then(numeric) {
        Some(value) => (convert(Some(value), ORACLE_SCALE), OverallSource::Oracle),
        None => (weights.combine(&dimensions), OverallSource::Weighted),
    };

    ScoreResult {
        dimensions,
        overall,
        analysis: text(payload.get("analysis")),
        strengths: string_list(payload.get("strengths")),
        concerns: string_list(payload.get("concerns")),
        highlight_quotes: string_list(payload.get("highlight_quotes")),
        algorithm_version: default_algorithm_version(),
        vertical: vertical.and_then(verticals::canonical_name).map(str::to_string),
        overall_source,
    }
}

fn dimension_score(scores: Option<&Map<String, Value>>, dimension: Dimension) -> f64 {
    match scores.and_then(|s| s.get(dimension.key())) {
        Some(value) => convert_value(value, ORACLE_SCALE),
        None => convert(Some(MISSING_DIMENSION_DEFAULT), ORACLE_SCALE),
    }
}

/// Scores interview answers with one oracle call each
pub struct ResponseScorer<O> {
    oracle: O,
    settings: OracleSettings,
}

impl<O: Oracle> ResponseScorer<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_settings(oracle, OracleSettings::default())
    }

    pub fn with_settings(oracle: O, settings: OracleSettings) -> Self {
        Self { oracle, settings }
    }

    /// Score one answer.
    ///
    /// Returns [`crate::Error::OracleUnparseable`] when the reply holds no JSON
    /// object, and propagates oracle call failures unchanged.
    pub async fn score(&self, request: &ScoringRequest) -> Result<ScoreResult> {
        if let Some(name) = request.vertical.as_deref() {
            if verticals::resolve(name).is_none() {
                warn!(vertical = name, "unknown vertical, scoring with uniform weights");
            }
        }

        let prompt = prompts::scoring_prompt(request, &self.settings);
        let span = info_span!("score_response", job_title = %request.job_title);
        let content = self.oracle.complete(&prompt).instrument(span).await?;

        let payload = extract_object(&content, STAGE).inspect_err(|e| {
            warn!(error = %e, "discarding unparseable scoring reply");
        })?;
        let result = score_from_payload(&payload, request.vertical.as_deref());
        debug!(
            overall = result.overall,
            source = ?result.overall_source,
            "scored response"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test payloads are objects"),
        }
    }

    #[test]
    fn test_out_of_range_values_clamp() {
        let result = score_from_payload(
            &payload(json!({
                "scores": {"communication": 150, "problem_solving": -20},
                "overall_score": 200
            })),
            None,
        );
        assert_eq!(result.dimensions.communication, 10.0);
        assert_eq!(result.dimensions.problem_solving, 0.0);
        assert_eq!(result.overall, 10.0);
        assert!(result.is_bounded());
    }

    #[test]
    fn test_missing_dimensions_default_to_midpoint() {
        let result = score_from_payload(&payload(json!({"analysis": "brief"})), None);
        for (_, value) in result.dimensions.iter() {
            assert_eq!(value, 5.0);
        }
        assert_eq!(result.overall, 5.0);
        assert_eq!(result.overall_source, OverallSource::Weighted);
    }

    #[test]
    fn test_non_numeric_dimension_clamps_to_zero() {
        let result = score_from_payload(
            &payload(json!({"scores": {"communication": "great", "motivation": null}})),
            None,
        );
        assert_eq!(result.dimensions.communication, 0.0);
        assert_eq!(result.dimensions.motivation, 0.0);
        assert_eq!(result.dimensions.culture_fit, 5.0);
    }

    #[test]
    fn test_weighted_overall_uses_vertical_weights() {
        let body = payload(json!({"scores": {
            "communication": 50, "problem_solving": 100, "domain_knowledge": 50,
            "motivation": 50, "culture_fit": 50
        }}));
        let flat = score_from_payload(&body, None);
        let systems = score_from_payload(&body, Some("systems_engineering"));
        // 0.2 * 10 + 0.8 * 5 vs 0.3 * 10 + 0.7 * 5
        assert!((flat.overall - 6.0).abs() < 1e-9);
        assert!((systems.overall - 6.5).abs() < 1e-9);
        assert_eq!(systems.vertical.as_deref(), Some("systems_engineering"));
    }

    #[test]
    fn test_non_numeric_overall_falls_back_to_weighted() {
        let result = score_from_payload(
            &payload(json!({"scores": {}, "overall_score": "n/a"})),
            None,
        );
        assert_eq!(result.overall_source, OverallSource::Weighted);
        assert_eq!(result.overall, 5.0);
    }

    #[test]
    fn test_qualitative_fields_copied() {
        let result = score_from_payload(
            &payload(json!({
                "analysis": "Structured answer",
                "strengths": ["STAR format"],
                "concerns": ["No metrics", 3],
                "highlight_quotes": "we cut latency in half"
            })),
            Some("engineering"),
        );
        assert_eq!(result.analysis, "Structured answer");
        assert_eq!(result.strengths, vec!["STAR format"]);
        assert_eq!(result.concerns, vec!["No metrics"]);
        assert_eq!(result.highlight_quotes, vec!["we cut latency in half"]);
        assert_eq!(result.algorithm_version, ALGORITHM_VERSION);
        assert_eq!(result.vertical.as_deref(), Some("software_engineering"));
    }

    #[test]
    fn test_normalized_rebounds_stored_scores() {
        let stored: ScoreResult = serde_json::from_value(json!({
            "communication": 80.0, "problem_solving": -2.0, "domain_knowledge": 7.5,
            "motivation": 10.0, "culture_fit": 3.0, "overall": 80.0
        }))
        .unwrap();
        assert!(!stored.is_bounded());

        let score = stored.normalized();
        assert!(score.is_bounded());
        assert_eq!(score.dimensions.communication, 10.0);
        assert_eq!(score.dimensions.problem_solving, 0.0);
        assert_eq!(score.dimensions.domain_knowledge, 7.5);
        assert_eq!(score.overall, 10.0);
    }

    #[test]
    fn test_score_result_serializes_flat_dimensions() {
        let result = ScoreResult::from_dimensions(DimensionScores::default(), None);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["communication"], json!(0.0));
        assert_eq!(value["overall_source"], json!("weighted"));
        let back: ScoreResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }
}
