//! Candidate scoring engine.
//!
//! Scores interview answers through an external language-model oracle,
//! aggregates them into interview summaries, calibrates scores against
//! cohort statistics, simulates interviewer personas, and runs heuristic
//! authenticity checks over parsed academic transcripts.

pub mod calibration;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod observability;
pub mod oracle;
pub mod output;
pub mod scoring;
pub mod testkit;
pub mod verification;

pub use crate::errors::{Error, Result};

pub use crate::calibration::{CalibrationCurve, CalibrationResult, CalibrationTable, Calibrator};

pub use crate::config::ScoringConfig;

pub use crate::oracle::{Oracle, OraclePrompt, OracleSettings};

pub use crate::scoring::{
    calculate_overall_score, Dimension, DimensionScores, DimensionWeights, InterviewSummary,
    JobContext, PersonaScore, Recommendation, ResponseScorer, ScoreResult, ScoredResponse,
    ScoringRequest, SummaryAggregator,
};

pub use crate::verification::{
    verify, verify_batch, verify_with, TranscriptInput, VerificationFlag, VerificationResult,
    VerificationStatus, VerifyOptions,
};
