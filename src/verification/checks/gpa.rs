use serde_json::json;

use super::{round2, CheckContext};
use crate::verification::record::TranscriptRecord;
use crate::verification::types::{codes, Severity, VerificationFlag};

/// Letter-graded courses needed before the recomputation is trusted
pub const MIN_GRADED_COURSES: usize = 5;
const HIGH_DIFFERENCE: f64 = 0.30;
const MEDIUM_DIFFERENCE: f64 = 0.15;

/// Unit-weighted GPA over letter-graded courses with positive units
pub fn calculated_gpa(transcript: &TranscriptRecord) -> Option<(f64, usize)> {
    let (points, units, count) = transcript
        .graded_courses()
        .filter(|c| c.units > 0.0)
        .filter_map(|c| c.grade.points().map(|p| (p, c.units)))
        .fold((0.0, 0.0, 0usize), |(points, units, count), (p, u)| {
            (points + p * u, units + u, count + 1)
        });
    (units > 0.0).then(|| (points / units, count))
}

/// Compare the reported GPA with one recomputed from the course grades
pub fn check(ctx: &CheckContext<'_>) -> Vec<VerificationFlag> {
    let Some(reported) = ctx.transcript.reported_gpa else {
        return Vec::new();
    };
    let Some((calculated, count)) = calculated_gpa(ctx.transcript) else {
        return Vec::new();
    };
    if count < MIN_GRADED_COURSES {
        return Vec::new();
    }

    let difference = round2((reported - calculated).abs());
    let (code, severity) = if difference > HIGH_DIFFERENCE {
        (codes::GPA_MISMATCH_HIGH, Severity::High)
    } else if difference > MEDIUM_DIFFERENCE {
        (codes::GPA_MISMATCH_MEDIUM, Severity::Medium)
    } else {
        return Vec::new();
    };

    vec![VerificationFlag::new(
        code,
        severity,
        format!("Reported GPA {reported:.2} differs from the GPA computed from course grades ({calculated:.2}) by {difference:.2}"),
    )
    .with_details(json!({
        "reported_gpa": reported,
        "calculated_gpa": round2(calculated),
        "difference": difference,
        "courses_counted": count,
    }))]
}
