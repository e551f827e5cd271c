//! Transcript verification.
//!
//! A stateless rule engine: the parsed transcript is normalised once, every
//! built-in check runs over it independently, and the raised flags are folded
//! into a confidence score and a status. No check can fail the whole run.

pub mod checks;
pub mod confidence;
pub mod grades;
pub mod record;
pub mod terms;
pub mod types;

use chrono::{Local, NaiveDate};
use rayon::prelude::*;

pub use checks::CheckContext;
pub use record::TranscriptRecord;
pub use types::{
    codes, CourseRecord, ParsedTranscript, PdfMetadata, SemesterRecord, Severity, TranscriptInput,
    VerificationFlag, VerificationResult, VerificationStatus,
};

/// Name of the check that only runs when PDF metadata is supplied
const METADATA_CHECK: &str = "pdf_metadata";

/// Knobs that make verification reproducible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Date the freshness check measures against
    pub reference_date: NaiveDate,
    /// Candidate's stated graduation year, if known
    pub graduation_year: Option<i32>,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
            graduation_year: None,
        }
    }
}

impl VerifyOptions {
    pub fn as_of(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            graduation_year: None,
        }
    }

    pub fn with_graduation_year(mut self, year: Option<i32>) -> Self {
        self.graduation_year = year;
        self
    }
}

/// Verify a transcript as of today
pub fn verify(input: &TranscriptInput) -> VerificationResult {
    verify_with(input, &VerifyOptions::default())
}

pub fn verify_with(input: &TranscriptInput, options: &VerifyOptions) -> VerificationResult {
    let span = tracing::debug_span!("verify_transcript", reference_date = %options.reference_date);
    let _guard = span.enter();

    let transcript = TranscriptRecord::from_parsed(&input.parsed_transcript);
    let ctx = CheckContext {
        transcript: &transcript,
        metadata: input.pdf_metadata.as_ref(),
        reference_date: options.reference_date,
        graduation_year: options.graduation_year,
    };

    let mut flags = Vec::new();
    let mut checks_run = Vec::new();
    for (name, check) in checks::CHECKS {
        if *name == METADATA_CHECK && ctx.metadata.is_none() {
            continue;
        }
        let raised = check(&ctx);
        tracing::debug!(check = name, flags = raised.len(), "check complete");
        flags.extend(raised);
        checks_run.push((*name).to_string());
    }

    let confidence_score = confidence::confidence_score(&flags);
    let status = confidence::classify(confidence_score);
    let summary = confidence::summarize(status, confidence_score, &flags);

    tracing::info!(
        %status,
        confidence = confidence_score,
        flags = flags.len(),
        courses = transcript.courses.len(),
        "transcript verified"
    );

    VerificationResult {
        status,
        confidence_score,
        flags,
        checks_run,
        summary,
    }
}

/// Verify independent transcripts in parallel; results keep input order
pub fn verify_batch(inputs: &[TranscriptInput], options: &VerifyOptions) -> Vec<VerificationResult> {
    inputs.par_iter().map(|input| verify_with(input, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> VerifyOptions {
        VerifyOptions::as_of(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())
    }

    fn input(semesters: Vec<SemesterRecord>, gpa: Option<f64>) -> TranscriptInput {
        TranscriptInput {
            parsed_transcript: ParsedTranscript {
                cumulative_gpa: gpa.map(serde_json::Value::from),
                semesters,
                ..ParsedTranscript::default()
            },
            pdf_metadata: None,
        }
    }

    fn graded(grades: &[&str]) -> Vec<CourseRecord> {
        grades.iter().map(|g| CourseRecord::new(g, 3.0)).collect()
    }

    #[test]
    fn test_empty_transcript_is_verified() {
        let result = verify_with(&TranscriptInput::default(), &options());
        assert_eq!(result.status, VerificationStatus::Verified);
        assert_eq!(result.confidence_score, 100);
        assert!(result.flags.is_empty());
        assert_eq!(
            result.checks_run,
            vec!["freshness", "gpa_calculation", "grade_anomalies", "semester_gaps", "grade_distribution"]
        );
    }

    #[test]
    fn test_metadata_check_runs_when_supplied() {
        let transcript = TranscriptInput {
            pdf_metadata: Some(PdfMetadata::default()),
            ..TranscriptInput::default()
        };
        let result = verify_with(&transcript, &options());
        assert_eq!(result.checks_run.last().map(String::as_str), Some("pdf_metadata"));
        assert_eq!(result.checks_run.len(), 6);
    }

    #[test]
    fn test_flags_fold_into_confidence() {
        // Stale (medium) and a large GPA mismatch (high)
        let semesters = vec![SemesterRecord::new("Fall", 2024, graded(&["A", "A", "A", "A", "A"]))];
        let result = verify_with(&input(semesters, Some(3.0)), &options());
        assert!(result.has_flag(codes::STALE_TRANSCRIPT));
        assert!(result.has_flag(codes::GPA_MISMATCH_HIGH));
        assert_eq!(result.confidence_score, 72);
        assert_eq!(result.status, VerificationStatus::Verified);
    }

    #[test]
    fn test_graduation_year_changes_freshness() {
        let semesters = vec![SemesterRecord::new("Spring", 2022, graded(&["A", "B"]))];
        let transcript = input(semesters, None);
        assert!(verify_with(&transcript, &options()).has_flag(codes::STALE_TRANSCRIPT));

        let graduated = options().with_graduation_year(Some(2022));
        assert!(!verify_with(&transcript, &graduated).has_flag(codes::STALE_TRANSCRIPT));
    }

    #[test]
    fn test_batch_preserves_order() {
        let stale = input(vec![SemesterRecord::new("Fall", 2019, Vec::new())], None);
        let current = input(vec![SemesterRecord::new("Spring", 2025, Vec::new())], None);
        let results = verify_batch(&[stale, current.clone(), current], &options());
        assert_eq!(results.len(), 3);
        assert!(results[0].has_flag(codes::STALE_TRANSCRIPT));
        assert!(results[1].flags.is_empty());
        assert!(results[2].flags.is_empty());
    }
}
