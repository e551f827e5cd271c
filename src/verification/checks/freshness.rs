use serde_json::json;

use super::CheckContext;
use crate::verification::terms::expected_latest_term;
use crate::verification::types::{codes, Severity, VerificationFlag};

/// Flag a transcript whose latest term is older than a current one would be.
///
/// Transcripts with no identifiable term are not flagged; a term newer than
/// expected (an in-progress semester) is fine.
pub fn check(ctx: &CheckContext<'_>) -> Vec<VerificationFlag> {
    let Some(actual) = ctx.transcript.latest_term() else {
        return Vec::new();
    };
    let expected = expected_latest_term(ctx.reference_date, ctx.graduation_year);
    if actual >= expected {
        return Vec::new();
    }

    vec![VerificationFlag::new(
        codes::STALE_TRANSCRIPT,
        Severity::Medium,
        format!("Most recent term is {actual}; a current transcript should include {expected}"),
    )
    .with_details(json!({
        "expected_term": expected.term,
        "expected_year": expected.year,
        "actual_term": actual.term,
        "actual_year": actual.year,
    }))]
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::verification::types::SemesterRecord;

    #[test]
    fn test_stale_transcript_flagged() {
        let transcript = record(vec![SemesterRecord::new("Fall", 2023, Vec::new())], None);
        let flags = check(&context(&transcript));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].code, codes::STALE_TRANSCRIPT);
        assert_eq!(flags[0].severity, Severity::Medium);
        let details = flags[0].details.as_ref().unwrap();
        assert_eq!(details["expected_term"], "Spring");
        assert_eq!(details["expected_year"], 2025);
        assert_eq!(details["actual_year"], 2023);
    }

    #[test]
    fn test_current_transcript_not_flagged() {
        let transcript = record(vec![SemesterRecord::new("Spring", 2025, Vec::new())], None);
        assert!(check(&context(&transcript)).is_empty());

        let newer = record(vec![SemesterRecord::new("Fall", 2025, Vec::new())], None);
        assert!(check(&context(&newer)).is_empty());
    }

    #[test]
    fn test_past_graduation_uses_graduation_spring() {
        let transcript = record(vec![SemesterRecord::new("Spring", 2021, Vec::new())], None);
        let mut ctx = context(&transcript);
        ctx.graduation_year = Some(2021);
        assert!(check(&ctx).is_empty());

        ctx.graduation_year = Some(2022);
        assert_eq!(check(&ctx).len(), 1);
    }

    #[test]
    fn test_no_terms_not_flagged() {
        let transcript = flat(&["A", "B"], None);
        assert!(check(&context(&transcript)).is_empty());
    }
}
