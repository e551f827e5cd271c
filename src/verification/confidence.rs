//! Confidence scoring and status classification.

use super::types::{Severity, VerificationFlag, VerificationStatus};

pub const MAX_CONFIDENCE: u8 = 100;
/// Lowest confidence still reported as verified
pub const VERIFIED_MIN: u8 = 60;
/// Lowest confidence still reported as a warning rather than suspicious
pub const WARNING_MIN: u8 = 30;

/// 100 minus the per-severity deductions, floored at zero
pub fn confidence_score(flags: &[VerificationFlag]) -> u8 {
    let deductions: u32 = flags.iter().map(|f| f.severity.deduction()).sum();
    u32::from(MAX_CONFIDENCE).saturating_sub(deductions) as u8
}

pub fn classify(confidence: u8) -> VerificationStatus {
    if confidence >= VERIFIED_MIN {
        VerificationStatus::Verified
    } else if confidence >= WARNING_MIN {
        VerificationStatus::Warning
    } else {
        VerificationStatus::Suspicious
    }
}

/// One-line human summary of a verification outcome
pub fn summarize(status: VerificationStatus, confidence: u8, flags: &[VerificationFlag]) -> String {
    if flags.is_empty() {
        return format!("No verification concerns found (confidence {confidence}/100).");
    }

    let count = |severity: Severity| flags.iter().filter(|f| f.severity == severity).count();
    let parts: Vec<String> = [Severity::High, Severity::Medium, Severity::Low]
        .into_iter()
        .filter_map(|severity| match count(severity) {
            0 => None,
            n => Some(format!("{n} {severity}")),
        })
        .collect();

    let lead = match status {
        VerificationStatus::Verified => "Transcript appears authentic",
        VerificationStatus::Warning => "Transcript needs manual review",
        VerificationStatus::Suspicious => "Transcript is likely altered or fabricated",
    };
    let noun = if flags.len() == 1 { "concern" } else { "concerns" };
    format!(
        "{lead} (confidence {confidence}/100): {} {noun} ({}).",
        flags.len(),
        parts.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::types::codes;

    fn flags(severities: &[Severity]) -> Vec<VerificationFlag> {
        severities
            .iter()
            .map(|s| VerificationFlag::new(codes::MISSING_SEMESTER, *s, "test"))
            .collect()
    }

    #[test]
    fn test_deductions() {
        assert_eq!(confidence_score(&[]), 100);
        // One high, one medium: 100 - 20 - 8
        assert_eq!(confidence_score(&flags(&[Severity::High, Severity::Medium])), 72);
        assert_eq!(
            confidence_score(&flags(&[Severity::High, Severity::High, Severity::High])),
            40
        );
    }

    #[test]
    fn test_floor_at_zero() {
        assert_eq!(confidence_score(&flags(&[Severity::High; 6])), 0);
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(classify(100), VerificationStatus::Verified);
        assert_eq!(classify(72), VerificationStatus::Verified);
        assert_eq!(classify(60), VerificationStatus::Verified);
        assert_eq!(classify(59), VerificationStatus::Warning);
        assert_eq!(classify(40), VerificationStatus::Warning);
        assert_eq!(classify(30), VerificationStatus::Warning);
        assert_eq!(classify(29), VerificationStatus::Suspicious);
    }

    #[test]
    fn test_summary_text() {
        assert_eq!(
            summarize(VerificationStatus::Verified, 100, &[]),
            "No verification concerns found (confidence 100/100)."
        );
        let raised = flags(&[Severity::High, Severity::Medium, Severity::Medium]);
        assert_eq!(
            summarize(VerificationStatus::Warning, 44, &raised),
            "Transcript needs manual review (confidence 44/100): 3 concerns (1 high, 2 medium)."
        );
    }
}
