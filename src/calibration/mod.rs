//! Score calibration.
//!
//! Maps a raw canonical score onto the cohort it should be compared with:
//! the curve for the candidate's (vertical, role type) gives a calibrated
//! score, a percentile within the cohort, and a hire probability. Everything
//! is deterministic given the inputs and the table.

pub mod curves;

use serde::Serialize;
use statrs::function::erf::erf;
use std::f64::consts::SQRT_2;

pub use curves::{CalibrationCurve, CalibrationTable};

use crate::scoring::score_normalizer::{clamp, round_to, SCALE_MAX, SCALE_MIN};

/// Calibrated score points per standard deviation from the cohort mean
const POINTS_PER_STD_DEV: f64 = 2.0;
/// Calibrated score of a candidate exactly at the cohort mean
const CALIBRATED_MIDPOINT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationResult {
    pub raw_score: f64,
    pub calibrated_score: f64,
    pub hire_probability: f64,
    pub percentile: f64,
    pub interpretation: String,
    /// "vertical/role" of the curve that was applied
    pub curve: String,
}

/// Interpretation band of a calibrated score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Exceptional,
    Strong,
    Solid,
    BelowAverage,
    NeedsImprovement,
}

impl Band {
    pub fn classify(calibrated: f64) -> Self {
        if calibrated >= 8.0 {
            Band::Exceptional
        } else if calibrated >= 6.5 {
            Band::Strong
        } else if calibrated >= 5.0 {
            Band::Solid
        } else if calibrated >= 3.5 {
            Band::BelowAverage
        } else {
            Band::NeedsImprovement
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Band::Exceptional => "Exceptional candidate: performs well above the cohort for this role",
            Band::Strong => "Strong candidate: clearly above the cohort average",
            Band::Solid => "Solid candidate: in line with the cohort average",
            Band::BelowAverage => "Below average: notable gaps relative to the cohort",
            Band::NeedsImprovement => "Needs improvement: significantly below the cohort for this role",
        }
    }
}

/// Standard normal cumulative distribution
fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / SQRT_2))
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Calibrates raw scores against a cohort table
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    table: CalibrationTable,
}

impl Calibrator {
    pub fn new(table: CalibrationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// Calibrate a raw score; the raw score is clamped to the canonical scale first
    pub fn calibrate(&self, raw_score: f64, vertical: Option<&str>, role_type: Option<&str>) -> CalibrationResult {
        let raw = clamp(raw_score, SCALE_MIN, SCALE_MAX);
        let curve = self.table.lookup(vertical, role_type);

        let z = (raw - curve.mean) / curve.std_dev;
        let calibrated = round_to(
            clamp(CALIBRATED_MIDPOINT + POINTS_PER_STD_DEV * z, SCALE_MIN, SCALE_MAX),
            2,
        );
        let percentile = round_to(clamp(standard_normal_cdf(z) * 100.0, 0.0, 100.0), 1);
        let hire_probability = round_to(logistic(curve.steepness * (raw - curve.hire_threshold)), 3);

        tracing::debug!(
            raw,
            calibrated,
            percentile,
            curve = %curve.key_label(),
            "calibrated score"
        );

        CalibrationResult {
            raw_score: raw,
            calibrated_score: calibrated,
            hire_probability,
            percentile,
            interpretation: Band::classify(calibrated).description().to_string(),
            curve: curve.key_label(),
        }
    }
}
