//! Independent transcript checks.
//!
//! Each check inspects the normalised transcript (and the PDF metadata when
//! present) and returns zero or more flags. Checks never fail: missing or
//! malformed data simply means nothing is flagged.

pub mod anomalies;
pub mod distribution;
pub mod freshness;
pub mod gaps;
pub mod gpa;
pub mod metadata;

use chrono::NaiveDate;

use super::record::TranscriptRecord;
use super::types::{PdfMetadata, VerificationFlag};

/// Everything a check may look at
#[derive(Debug, Clone)]
pub struct CheckContext<'a> {
    pub transcript: &'a TranscriptRecord,
    pub metadata: Option<&'a PdfMetadata>,
    pub reference_date: NaiveDate,
    pub graduation_year: Option<i32>,
}

pub type CheckFn = fn(&CheckContext<'_>) -> Vec<VerificationFlag>;

/// Built-in checks, in the order they run
pub const CHECKS: &[(&str, CheckFn)] = &[
    ("freshness", freshness::check),
    ("gpa_calculation", gpa::check),
    ("grade_anomalies", anomalies::check),
    ("semester_gaps", gaps::check),
    ("grade_distribution", distribution::check),
    ("pdf_metadata", metadata::check),
];

/// Round to two decimals for reporting and threshold comparisons
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::verification::types::{CourseRecord, ParsedTranscript, SemesterRecord};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn courses(grades: &[&str]) -> Vec<CourseRecord> {
        grades.iter().map(|g| CourseRecord::new(g, 3.0)).collect()
    }

    pub fn record(semesters: Vec<SemesterRecord>, gpa: Option<f64>) -> TranscriptRecord {
        TranscriptRecord::from_parsed(&ParsedTranscript {
            cumulative_gpa: gpa.map(serde_json::Value::from),
            semesters,
            ..ParsedTranscript::default()
        })
    }

    pub fn flat(grades: &[&str], gpa: Option<f64>) -> TranscriptRecord {
        TranscriptRecord::from_parsed(&ParsedTranscript {
            cumulative_gpa: gpa.map(serde_json::Value::from),
            courses: courses(grades),
            ..ParsedTranscript::default()
        })
    }

    pub fn context(transcript: &TranscriptRecord) -> CheckContext<'_> {
        CheckContext {
            transcript,
            metadata: None,
            reference_date: date(2025, 10, 1),
            graduation_year: None,
        }
    }
}
