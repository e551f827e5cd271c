//! Rater persona simulation.
//!
//! A persona re-weights an existing score's dimensions to show how a different
//! kind of interviewer would likely read the same answers. Each persona's delta
//! is zero-sum, so reweighting moves emphasis between dimensions without
//! inflating the scale. No oracle call is made.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;

use super::dimensions::{DimensionWeights, WeightDelta};
use super::response::ScoreResult;
use super::score_normalizer::round_to;
use super::verticals;

/// A simulated rater archetype
#[derive(Debug, Clone, Serialize)]
pub struct PersonaConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub delta: WeightDelta,
}

/// One persona's view of a score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonaScore {
    pub persona: String,
    pub weights: DimensionWeights,
    pub overall: f64,
    /// Persona overall minus the baseline weighted overall
    pub delta_from_baseline: f64,
}

static PERSONAS: Lazy<BTreeMap<&'static str, PersonaConfig>> = Lazy::new(|| {
    [
        PersonaConfig {
            name: "technical_lead",
            description: "Senior engineer focused on depth of reasoning and expertise",
            delta: DimensionWeights::new(-0.05, 0.10, 0.05, -0.05, -0.05),
        },
        PersonaConfig {
            name: "hiring_manager",
            description: "Balances delivery with team fit and drive",
            delta: DimensionWeights::new(0.05, -0.05, -0.10, 0.05, 0.05),
        },
        PersonaConfig {
            name: "culture_champion",
            description: "Values collaboration, motivation and team alignment",
            delta: DimensionWeights::new(0.05, -0.10, -0.10, 0.05, 0.10),
        },
        PersonaConfig {
            name: "executive",
            description: "Looks for clear communication and ownership",
            delta: DimensionWeights::new(0.10, 0.05, -0.10, 0.05, -0.10),
        },
        PersonaConfig {
            name: "peer_reviewer",
            description: "Future teammate weighing hands-on knowledge",
            delta: DimensionWeights::new(-0.10, 0.05, 0.10, -0.10, 0.05),
        },
    ]
    .into_iter()
    .map(|persona| (persona.name, persona))
    .collect()
});

/// All registered personas, ordered by name
pub fn personas() -> impl Iterator<Item = &'static PersonaConfig> {
    PERSONAS.values()
}

pub fn persona(name: &str) -> Option<&'static PersonaConfig> {
    PERSONAS.get(verticals::normalize_key(name).as_str())
}

/// Re-score `score` through one persona.
///
/// An unknown persona gets the vertical's baseline weights.
pub fn simulate(score: &ScoreResult, persona_name: &str, vertical: Option<&str>) -> PersonaScore {
    let baseline = verticals::weights_for(vertical);
    let weights = match persona(persona_name) {
        Some(config) => baseline.apply_delta(&config.delta),
        None => {
            tracing::debug!(persona = persona_name, "unknown persona, using baseline weights");
            baseline
        }
    };

    let baseline_overall = baseline.combine(&score.dimensions);
    let overall = weights.combine(&score.dimensions);

    PersonaScore {
        persona: persona_name.to_string(),
        weights,
        overall: round_to(overall, 2),
        delta_from_baseline: round_to(overall - baseline_overall, 2),
    }
}

/// Re-score `score` through every registered persona
pub fn simulate_all(score: &ScoreResult, vertical: Option<&str>) -> Vec<PersonaScore> {
    personas()
        .map(|config| simulate(score, config.name, vertical))
        .collect()
}
