use serde_json::json;
use std::collections::BTreeSet;

use super::CheckContext;
use crate::verification::terms::TermKey;
use crate::verification::types::{codes, Severity, VerificationFlag};

/// Enrolment spans longer than this are treated as unreliable and not walked
pub const MAX_SPAN_YEARS: i32 = 15;

/// Flag each Spring or Fall term missing between the first and last regular term.
///
/// Summer and Winter terms are ignored entirely.
pub fn check(ctx: &CheckContext<'_>) -> Vec<VerificationFlag> {
    let present: BTreeSet<TermKey> = ctx
        .transcript
        .semesters
        .iter()
        .filter_map(|s| s.key)
        .filter(|k| k.is_regular())
        .collect();

    let (Some(&first), Some(&last)) = (present.first(), present.last()) else {
        return Vec::new();
    };
    if present.len() < 2 {
        return Vec::new();
    }
    if last.year - first.year > MAX_SPAN_YEARS {
        tracing::debug!(%first, %last, "enrolment span too long; skipping gap check");
        return Vec::new();
    }

    missing_terms(first, last, &present)
        .into_iter()
        .map(|missing| {
            VerificationFlag::new(
                codes::MISSING_SEMESTER,
                Severity::Medium,
                format!("No courses recorded for {missing}"),
            )
            .with_details(json!({ "term": missing.term, "year": missing.year }))
        })
        .collect()
}

fn missing_terms(first: TermKey, last: TermKey, present: &BTreeSet<TermKey>) -> Vec<TermKey> {
    std::iter::successors(Some(first.next_regular()), |k| Some(k.next_regular()))
        .take_while(|k| *k < last)
        .filter(|k| !present.contains(k))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::verification::terms::Term;
    use crate::verification::types::SemesterRecord;

    fn semesters(terms: &[(&str, i32)]) -> Vec<SemesterRecord> {
        terms
            .iter()
            .map(|(term, year)| SemesterRecord::new(term, *year, courses(&["A"])))
            .collect()
    }

    #[test]
    fn test_single_missing_fall() {
        let transcript = record(
            semesters(&[("Fall", 2022), ("Spring", 2023), ("Spring", 2024), ("Fall", 2024)]),
            None,
        );
        let flags = check(&context(&transcript));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].code, codes::MISSING_SEMESTER);
        assert_eq!(flags[0].severity, Severity::Medium);
        let details = flags[0].details.as_ref().unwrap();
        assert_eq!(details["term"], "Fall");
        assert_eq!(details["year"], 2023);
    }

    #[test]
    fn test_summer_terms_ignored() {
        let transcript = record(
            semesters(&[("Spring", 2023), ("Summer", 2023), ("Fall", 2023), ("Spring", 2024)]),
            None,
        );
        assert!(check(&context(&transcript)).is_empty());
    }

    #[test]
    fn test_unordered_input_is_sorted() {
        let transcript = record(semesters(&[("Fall", 2024), ("Spring", 2023)]), None);
        let flags = check(&context(&transcript));
        let missing: Vec<_> = flags
            .iter()
            .map(|f| f.details.as_ref().unwrap()["year"].as_i64().unwrap())
            .collect();
        assert_eq!(missing, vec![2023, 2024]);
    }

    #[test]
    fn test_single_term_not_checked() {
        let transcript = record(semesters(&[("Fall", 2020)]), None);
        assert!(check(&context(&transcript)).is_empty());
    }

    #[test]
    fn test_missing_terms_walk() {
        let present: BTreeSet<_> = [TermKey::new(Term::Spring, 2020), TermKey::new(Term::Spring, 2021)]
            .into_iter()
            .collect();
        assert_eq!(
            missing_terms(TermKey::new(Term::Spring, 2020), TermKey::new(Term::Spring, 2021), &present),
            vec![TermKey::new(Term::Fall, 2020)]
        );
    }

    #[test]
    fn test_implausible_span_skipped() {
        let transcript = record(semesters(&[("Fall", 1990), ("Spring", 2024)]), None);
        assert!(check(&context(&transcript)).is_empty());
    }
}
