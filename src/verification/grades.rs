//! Grade classification on the 4.0 scale.

/// Highest grade points counted toward a GPA
pub const MAX_GRADE_POINTS: f64 = 4.0;

/// Numeric grades above this are not read as grade points (e.g. percentages)
const MAX_NUMERIC_GRADE: f64 = 4.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grade {
    /// Counts toward the GPA with the given points
    Letter(f64),
    /// Pass/fail, credit/no-credit, satisfactory/unsatisfactory
    PassFail,
    /// Withdrawn; excluded from the GPA
    Withdrawal,
    /// Incomplete, in progress, audit, blank or unrecognised
    Unusable,
}

impl Grade {
    pub fn classify(raw: &str) -> Self {
        let grade = raw.trim().to_uppercase();
        if let Some(points) = letter_points(&grade) {
            return Grade::Letter(points);
        }
        match grade.as_str() {
            "P" | "PASS" | "NP" | "CR" | "NC" | "S" | "U" | "SAT" | "UNSAT" | "FAIL" => Grade::PassFail,
            "W" | "WD" | "WP" | "WF" | "WITHDRAWN" => Grade::Withdrawal,
            _ => match grade.parse::<f64>() {
                Ok(points) if (0.0..=MAX_NUMERIC_GRADE).contains(&points) => {
                    Grade::Letter(points.min(MAX_GRADE_POINTS))
                }
                _ => Grade::Unusable,
            },
        }
    }

    pub fn points(self) -> Option<f64> {
        match self {
            Grade::Letter(points) => Some(points),
            _ => None,
        }
    }

    pub fn is_pass_fail(self) -> bool {
        matches!(self, Grade::PassFail)
    }
}

fn letter_points(grade: &str) -> Option<f64> {
    let points = match grade {
        "A+" | "A" => 4.0,
        "A-" => 3.7,
        "B+" => 3.3,
        "B" => 3.0,
        "B-" => 2.7,
        "C+" => 2.3,
        "C" => 2.0,
        "C-" => 1.7,
        "D+" => 1.3,
        "D" => 1.0,
        "D-" => 0.7,
        "F" | "E" => 0.0,
        _ => return None,
    };
    Some(points)
}
