//! Interview response scoring.
//!
//! Dimension scores come back from the oracle on a 0-100 scale and are
//! normalised onto the canonical 0-10 scale, combined with the weights of the
//! candidate's vertical, and optionally re-weighted through interviewer
//! personas.

pub mod dimensions;
pub mod persona;
pub mod response;
pub mod score_normalizer;
pub mod summary;
pub mod verticals;

pub use dimensions::{Dimension, DimensionScores, DimensionWeights, WeightDelta};
pub use persona::{PersonaConfig, PersonaScore};
pub use response::{OverallSource, ResponseScorer, ScoreResult, ScoringRequest};
pub use summary::{
    calculate_overall_score, InterviewSummary, JobContext, Recommendation, ScoredResponse,
    SummaryAggregator,
};
pub use verticals::VerticalConfig;
