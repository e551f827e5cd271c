use serde_json::json;
use statrs::statistics::Statistics;

use super::{round2, CheckContext};
use crate::verification::types::{codes, Severity, VerificationFlag};

/// Graded courses needed before the distribution is examined
pub const MIN_GRADES: usize = 15;
const MIN_STD_DEV: f64 = 0.10;
const MIN_ALL_A_GRADES: usize = 20;
const A_RANGE_FLOOR: f64 = 3.7;

pub fn check(ctx: &CheckContext<'_>) -> Vec<VerificationFlag> {
    let points = ctx.transcript.grade_points();
    if points.len() < MIN_GRADES {
        return Vec::new();
    }

    let mut flags = Vec::new();

    let std_dev = points.iter().population_std_dev();
    if std_dev < MIN_STD_DEV {
        flags.push(
            VerificationFlag::new(
                codes::UNIFORM_GRADE_DISTRIBUTION,
                Severity::Low,
                format!("Grade points barely vary across {} courses (std dev {std_dev:.3})", points.len()),
            )
            .with_details(json!({
                "std_dev": round2(std_dev),
                "mean": round2(points.iter().mean()),
                "count": points.len(),
            })),
        );
    }

    if points.len() >= MIN_ALL_A_GRADES && points.iter().all(|p| *p >= A_RANGE_FLOOR) {
        flags.push(
            VerificationFlag::new(
                codes::ALL_A_GRADES,
                Severity::Low,
                format!("All {} graded courses are in the A range", points.len()),
            )
            .with_details(json!({ "count": points.len() })),
        );
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_uniform_distribution_flagged() {
        let transcript = flat(&["B"; 15], None);
        let flags = check(&context(&transcript));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].code, codes::UNIFORM_GRADE_DISTRIBUTION);
    }

    #[test]
    fn test_varied_distribution_not_flagged() {
        let mut grades = vec!["B"; 10];
        grades.extend(["A", "C", "B+", "A-", "C+"]);
        let transcript = flat(&grades, None);
        assert!(check(&context(&transcript)).is_empty());
    }

    #[test]
    fn test_all_a_range_with_variation() {
        let mut grades = vec!["A"; 10];
        grades.extend(vec!["A-"; 10]);
        let transcript = flat(&grades, None);
        let flags = check(&context(&transcript));
        let codes_raised: Vec<_> = flags.iter().map(|f| f.code.as_str()).collect();
        // std dev 0.15: only the A-range flag
        assert_eq!(codes_raised, vec![codes::ALL_A_GRADES]);
    }

    #[test]
    fn test_twenty_identical_a_raise_both() {
        let transcript = flat(&["A"; 20], None);
        let flags = check(&context(&transcript));
        assert_eq!(flags.len(), 2);
    }

    #[test]
    fn test_too_few_grades_skipped() {
        let transcript = flat(&["A"; 14], None);
        assert!(check(&context(&transcript)).is_empty());
    }
}
