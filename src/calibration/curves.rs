//! Calibration curves keyed by (vertical, role type).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::verticals::{self, normalize_key};

/// Wildcard matching any vertical or role type
pub const ANY: &str = "*";

/// Population statistics of raw scores for one (vertical, role) cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCurve {
    #[serde(default = "any")]
    pub vertical: String,
    #[serde(default = "any")]
    pub role_type: String,
    /// Mean raw score of the cohort
    pub mean: f64,
    /// Standard deviation of raw scores of the cohort
    pub std_dev: f64,
    /// Raw score at which hire probability is 50%
    pub hire_threshold: f64,
    /// Slope of the logistic hire-probability curve
    #[serde(default = "default_steepness")]
    pub steepness: f64,
}

fn any() -> String {
    ANY.to_string()
}

pub fn default_steepness() -> f64 {
    1.5
}

impl CalibrationCurve {
    pub fn new(vertical: &str, role_type: &str, mean: f64, std_dev: f64, hire_threshold: f64) -> Self {
        Self {
            vertical: vertical.to_string(),
            role_type: role_type.to_string(),
            mean,
            std_dev,
            hire_threshold,
            steepness: default_steepness(),
        }
    }

    /// Reject curves that would produce NaN or infinite calibrations
    pub fn validate(&self) -> Result<(), String> {
        let finite = [self.mean, self.std_dev, self.hire_threshold, self.steepness]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(format!("calibration curve {} has non-finite parameters", self.key_label()));
        }
        if self.std_dev <= 0.0 {
            return Err(format!(
                "calibration curve {} std_dev must be positive, got {}",
                self.key_label(),
                self.std_dev
            ));
        }
        if self.steepness <= 0.0 {
            return Err(format!(
                "calibration curve {} steepness must be positive, got {}",
                self.key_label(),
                self.steepness
            ));
        }
        Ok(())
    }

    pub fn key_label(&self) -> String {
        format!("{}/{}", self.vertical, self.role_type)
    }
}

/// Built-in cohort statistics
static BUILT_IN: Lazy<Vec<CalibrationCurve>> = Lazy::new(|| {
    vec![
        CalibrationCurve::new(ANY, ANY, 6.0, 1.5, 7.0),
        CalibrationCurve::new(ANY, "junior", 5.5, 1.6, 6.5),
        CalibrationCurve::new(ANY, "senior", 6.5, 1.3, 7.5),
        CalibrationCurve::new("software_engineering", ANY, 6.2, 1.4, 7.2),
        CalibrationCurve::new("software_engineering", "senior", 6.8, 1.2, 7.8),
        CalibrationCurve::new("systems_engineering", ANY, 6.1, 1.4, 7.2),
        CalibrationCurve::new("data_science", ANY, 6.3, 1.4, 7.3),
        CalibrationCurve::new("sales", ANY, 6.4, 1.7, 7.0),
        CalibrationCurve::new("customer_success", ANY, 6.5, 1.5, 7.0),
        CalibrationCurve::new("product_management", ANY, 6.2, 1.5, 7.2),
    ]
});

/// Fold role-type spellings onto the seniority buckets the table uses
pub fn normalize_role(role_type: &str) -> String {
    let key = normalize_key(role_type);
    match key.as_str() {
        "" => ANY.to_string(),
        "intern" | "entry" | "entry_level" | "graduate" | "new_grad" | "associate" => {
            "junior".to_string()
        }
        "sr" | "staff" | "principal" | "lead" => "senior".to_string(),
        "mid" | "mid_level" | "intermediate" => "mid".to_string(),
        _ => key,
    }
}

/// Lookup table of calibration curves
#[derive(Debug, Clone)]
pub struct CalibrationTable {
    curves: BTreeMap<(String, String), CalibrationCurve>,
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::from_curves(BUILT_IN.iter().cloned())
    }
}

impl CalibrationTable {
    pub fn from_curves(curves: impl IntoIterator<Item = CalibrationCurve>) -> Self {
        let mut table = Self {
            curves: BTreeMap::new(),
        };
        table.extend(curves);
        if !table.curves.contains_key(&(ANY.to_string(), ANY.to_string())) {
            if let Some(fallback) = BUILT_IN.first() {
                table.insert(fallback.clone());
            }
        }
        table
    }

    /// Add or replace curves, keyed by their normalised (vertical, role)
    pub fn extend(&mut self, curves: impl IntoIterator<Item = CalibrationCurve>) {
        for curve in curves {
            self.insert(curve);
        }
    }

    fn insert(&mut self, mut curve: CalibrationCurve) {
        curve.vertical = if curve.vertical == ANY {
            ANY.to_string()
        } else {
            verticals::canonical_name(&curve.vertical)
                .map(str::to_string)
                .unwrap_or_else(|| normalize_key(&curve.vertical))
        };
        curve.role_type = if curve.role_type == ANY {
            ANY.to_string()
        } else {
            normalize_role(&curve.role_type)
        };
        self.curves
            .insert((curve.vertical.clone(), curve.role_type.clone()), curve);
    }

    /// Most specific curve for a cohort.
    ///
    /// Falls back from (vertical, role) to (vertical, *), then (*, role), then (*, *).
    pub fn lookup(&self, vertical: Option<&str>, role_type: Option<&str>) -> &CalibrationCurve {
        let vertical = vertical
            .and_then(verticals::canonical_name)
            .unwrap_or(ANY)
            .to_string();
        let role = role_type.map(normalize_role).unwrap_or_else(any);

        let candidates = [
            (vertical.clone(), role.clone()),
            (vertical, any()),
            (any(), role),
            (any(), any()),
        ];
        candidates
            .iter()
            .find_map(|key| self.curves.get(key))
            .unwrap_or(&BUILT_IN[0])
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
