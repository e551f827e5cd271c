//! The five interview dimensions and the weight maps that combine them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::score_normalizer::{clamp, SCALE_MAX, SCALE_MIN};

/// Tolerance for a weight map summing to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// One scored dimension of an interview answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Communication,
    ProblemSolving,
    DomainKnowledge,
    Motivation,
    CultureFit,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Communication,
        Dimension::ProblemSolving,
        Dimension::DomainKnowledge,
        Dimension::Motivation,
        Dimension::CultureFit,
    ];

    /// Key used in oracle payloads
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Communication => "communication",
            Dimension::ProblemSolving => "problem_solving",
            Dimension::DomainKnowledge => "domain_knowledge",
            Dimension::Motivation => "motivation",
            Dimension::CultureFit => "culture_fit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Communication => "Communication",
            Dimension::ProblemSolving => "Problem solving",
            Dimension::DomainKnowledge => "Domain knowledge",
            Dimension::Motivation => "Motivation",
            Dimension::CultureFit => "Culture fit",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Canonical-scale scores for every dimension
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub communication: f64,
    pub problem_solving: f64,
    pub domain_knowledge: f64,
    pub motivation: f64,
    pub culture_fit: f64,
}

impl DimensionScores {
    /// Build scores by evaluating `f` for each dimension
    pub fn from_fn(mut f: impl FnMut(Dimension) -> f64) -> Self {
        Self {
            communication: f(Dimension::Communication),
            problem_solving: f(Dimension::ProblemSolving),
            domain_knowledge: f(Dimension::DomainKnowledge),
            motivation: f(Dimension::Motivation),
            culture_fit: f(Dimension::CultureFit),
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Communication => self.communication,
            Dimension::ProblemSolving => self.problem_solving,
            Dimension::DomainKnowledge => self.domain_knowledge,
            Dimension::Motivation => self.motivation,
            Dimension::CultureFit => self.culture_fit,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Plain average, used only for display comparisons
    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum::<f64>() / Dimension::ALL.len() as f64
    }
}

/// Signed per-dimension adjustment applied on top of a weight map
pub type WeightDelta = DimensionWeights;

/// Dimension -> weight map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub communication: f64,
    pub problem_solving: f64,
    pub domain_knowledge: f64,
    pub motivation: f64,
    pub culture_fit: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self::uniform()
    }
}

impl DimensionWeights {
    pub const fn new(
        communication: f64,
        problem_solving: f64,
        domain_knowledge: f64,
        motivation: f64,
        culture_fit: f64,
    ) -> Self {
        Self {
            communication,
            problem_solving,
            domain_knowledge,
            motivation,
            culture_fit,
        }
    }

    /// Equal weighting, the fallback for unknown verticals
    pub const fn uniform() -> Self {
        Self::new(0.20, 0.20, 0.20, 0.20, 0.20)
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Communication => self.communication,
            Dimension::ProblemSolving => self.problem_solving,
            Dimension::DomainKnowledge => self.domain_knowledge,
            Dimension::Motivation => self.motivation,
            Dimension::CultureFit => self.culture_fit,
        }
    }

    fn map(&self, mut f: impl FnMut(Dimension, f64) -> f64) -> Self {
        Self {
            communication: f(Dimension::Communication, self.communication),
            problem_solving: f(Dimension::ProblemSolving, self.problem_solving),
            domain_knowledge: f(Dimension::DomainKnowledge, self.domain_knowledge),
            motivation: f(Dimension::Motivation, self.motivation),
            culture_fit: f(Dimension::CultureFit, self.culture_fit),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, w)| w).sum()
    }

    /// Whether the weights sum to 1.0 within tolerance
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }

    /// Validate that every weight lies in [0, 1] and the map sums to 1.0
    pub fn validate(&self, name: &str) -> Result<(), String> {
        if let Some((dim, w)) = self.iter().find(|(_, w)| !(0.0..=1.0).contains(w)) {
            return Err(format!(
                "{} weight for {} must be between 0.0 and 1.0, got {}",
                name, dim, w
            ));
        }
        if !self.is_normalized() {
            return Err(format!(
                "{} weights must sum to 1.0, but sum to {:.3}",
                name,
                self.sum()
            ));
        }
        Ok(())
    }

    /// Weighted combination of dimension scores, bounded to the canonical scale
    pub fn combine(&self, scores: &DimensionScores) -> f64 {
        let total: f64 = self.iter().map(|(d, w)| w * scores.get(d)).sum();
        clamp(total, SCALE_MIN, SCALE_MAX)
    }

    /// Add a delta, floor negatives at zero and renormalise to sum 1.0.
    ///
    /// A delta that would zero out every weight falls back to `self`.
    pub fn apply_delta(&self, delta: &WeightDelta) -> Self {
        let shifted = self.map(|d, w| (w + delta.get(d)).max(0.0));
        let total = shifted.sum();
        if total <= f64::EPSILON {
            return *self;
        }
        shifted.map(|_, w| w / total)
    }
}
