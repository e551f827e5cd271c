use serde_json::json;

use super::CheckContext;
use crate::verification::grades::MAX_GRADE_POINTS;
use crate::verification::types::{codes, Severity, VerificationFlag};

/// Courses needed before any anomaly is considered
pub const MIN_COURSES: usize = 10;
const MIN_IDENTICAL_LETTERS: usize = 20;
const MAX_PASS_FAIL_SHARE: f64 = 0.5;

pub fn check(ctx: &CheckContext<'_>) -> Vec<VerificationFlag> {
    let transcript = ctx.transcript;
    if transcript.courses.len() < MIN_COURSES {
        return Vec::new();
    }

    let mut flags = Vec::new();
    flags.extend(detect_identical_grades(ctx));
    flags.extend(detect_scale_violation(ctx));
    flags.extend(detect_excessive_pass_fail(ctx));
    flags
}

fn detect_identical_grades(ctx: &CheckContext<'_>) -> Option<VerificationFlag> {
    let letters: Vec<&str> = ctx
        .transcript
        .graded_courses()
        .map(|c| c.grade_text.as_str())
        .collect();
    let first = *letters.first()?;
    if letters.len() < MIN_IDENTICAL_LETTERS || letters.iter().any(|g| *g != first) {
        return None;
    }
    Some(
        VerificationFlag::new(
            codes::ALL_IDENTICAL_GRADES,
            Severity::Medium,
            format!("All {} graded courses carry the same grade ({first})", letters.len()),
        )
        .with_details(json!({ "grade": first, "count": letters.len() })),
    )
}

fn detect_scale_violation(ctx: &CheckContext<'_>) -> Option<VerificationFlag> {
    let reported = ctx.transcript.reported_gpa?;
    (reported > MAX_GRADE_POINTS).then(|| {
        VerificationFlag::new(
            codes::GPA_SCALE_VIOLATION,
            Severity::High,
            format!("Reported GPA {reported:.2} exceeds the {MAX_GRADE_POINTS:.1} scale"),
        )
        .with_details(json!({ "reported_gpa": reported, "scale_max": MAX_GRADE_POINTS }))
    })
}

fn detect_excessive_pass_fail(ctx: &CheckContext<'_>) -> Option<VerificationFlag> {
    let total = ctx.transcript.courses.len();
    let pass_fail = ctx
        .transcript
        .courses
        .iter()
        .filter(|c| c.grade.is_pass_fail())
        .count();
    let share = pass_fail as f64 / total as f64;
    (share > MAX_PASS_FAIL_SHARE).then(|| {
        VerificationFlag::new(
            codes::EXCESSIVE_PASS_FAIL,
            Severity::Low,
            format!("{pass_fail} of {total} courses are graded pass/fail"),
        )
        .with_details(json!({ "pass_fail_courses": pass_fail, "total_courses": total }))
    })
}
