//! Builders for verifier and scoring test data.
//!
//! | Helper | Purpose |
//! |--------|---------|
//! | [`TranscriptBuilder`] | Build a [`TranscriptInput`] term by term |
//! | [`scoring_payload`] | Oracle scoring JSON with the given 0-100 dimension scores |
//! | [`reference_date`] | Fixed `NaiveDate` for reproducible freshness checks |

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::scoring::ScoringRequest;
use crate::verification::{CourseRecord, ParsedTranscript, PdfMetadata, SemesterRecord, TranscriptInput};

/// Calendar date, panicking on an invalid one
pub fn reference_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Fluent builder for verifier input.
///
/// ```rust,ignore
/// let input = TranscriptBuilder::new()
///     .term("Fall", 2022, &["A", "B+", "A-"])
///     .term("Spring", 2023, &["B", "A"])
///     .reported_gpa(3.6)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranscriptBuilder {
    transcript: ParsedTranscript,
    metadata: Option<PdfMetadata>,
    units: Option<f64>,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units given to every course added after this call (default 3)
    pub fn units(mut self, units: f64) -> Self {
        self.units = Some(units);
        self
    }

    fn courses(&self, grades: &[&str]) -> Vec<CourseRecord> {
        let units = self.units.unwrap_or(3.0);
        grades.iter().map(|g| CourseRecord::new(g, units)).collect()
    }

    /// Add a semester with one course per grade
    pub fn term(mut self, term: &str, year: i32, grades: &[&str]) -> Self {
        let courses = self.courses(grades);
        self.transcript
            .semesters
            .push(SemesterRecord::new(term, year, courses));
        self
    }

    /// Add courses to the flat top-level list
    pub fn loose_courses(mut self, grades: &[&str]) -> Self {
        let courses = self.courses(grades);
        self.transcript.courses.extend(courses);
        self
    }

    pub fn reported_gpa(mut self, gpa: f64) -> Self {
        self.transcript.cumulative_gpa = Some(Value::from(gpa));
        self
    }

    pub fn metadata(mut self, metadata: PdfMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn build(self) -> TranscriptInput {
        TranscriptInput {
            parsed_transcript: self.transcript,
            pdf_metadata: self.metadata,
        }
    }
}

/// Oracle scoring payload with the five dimension scores in canonical order
pub fn scoring_payload(scores: [f64; 5]) -> Value {
    let [communication, problem_solving, domain_knowledge, motivation, culture_fit] = scores;
    json!({
        "scores": {
            "communication": communication,
            "problem_solving": problem_solving,
            "domain_knowledge": domain_knowledge,
            "motivation": motivation,
            "culture_fit": culture_fit,
        },
        "analysis": "Structured answer with concrete examples.",
        "strengths": ["clear structure"],
        "concerns": [],
        "highlight_quotes": [],
    })
}

/// Minimal scoring request for a vertical
pub fn scoring_request(vertical: Option<&str>) -> ScoringRequest {
    ScoringRequest {
        question: "Tell me about a system you designed.".to_string(),
        transcript: "I designed a queue-backed ingestion service...".to_string(),
        job_title: "Backend Engineer".to_string(),
        job_requirements: vec!["Rust".to_string(), "Distributed systems".to_string()],
        vertical: vertical.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assembles_terms() {
        let input = TranscriptBuilder::new()
            .term("Fall", 2022, &["A", "B"])
            .units(4.0)
            .term("Spring", 2023, &["C"])
            .reported_gpa(3.0)
            .build();
        let transcript = &input.parsed_transcript;
        assert_eq!(transcript.semesters.len(), 2);
        assert_eq!(transcript.semesters[1].courses[0].unit_count(), 4.0);
        assert_eq!(transcript.reported_gpa(), Some(3.0));
    }
}
