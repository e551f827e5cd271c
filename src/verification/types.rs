//! Input and output types of the transcript verifier.
//!
//! Inputs mirror what an upstream transcript parser produces and tolerate its
//! spelling variations (`gpa`/`cumulative_gpa`, `units`/`credits`,
//! `Creator`/`creator`, ...). A field of an unexpected type reads as absent and
//! a list entry that does not fit is dropped, so deserialization of a JSON
//! object never fails on content. Outputs are plain serialisable records.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::scoring::score_normalizer::numeric;

/// Read a list, dropping entries that do not fit `T`; anything but an array is empty
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Read free text; numbers are rendered, any other type is absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Read a nested record, falling back to its default when the shape is wrong
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_record(deserializer)?.unwrap_or_default())
}

/// Read an optional nested record; a value of the wrong shape is absent
fn lenient_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| serde_json::from_value(v).ok()))
}

/// One course line of a transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    /// Letter, pass/fail mark or numeric grade
    #[serde(default)]
    pub grade: Option<Value>,
    #[serde(default)]
    pub units: Option<Value>,
    #[serde(default)]
    pub credits: Option<Value>,
}

/// Units assumed for a course that lists none
pub const DEFAULT_UNITS: f64 = 1.0;

impl CourseRecord {
    pub fn new(grade: &str, units: f64) -> Self {
        Self {
            grade: Some(Value::String(grade.to_string())),
            units: Some(Value::from(units)),
            ..Self::default()
        }
    }

    /// Grade as text; numbers are rendered, anything else is absent
    pub fn grade_text(&self) -> Option<String> {
        match self.grade.as_ref()? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Credit units, preferring `units` over `credits`; negative counts as zero
    pub fn unit_count(&self) -> f64 {
        self.units
            .as_ref()
            .and_then(numeric)
            .or_else(|| self.credits.as_ref().and_then(numeric))
            .filter(|u| u.is_finite())
            .map_or(DEFAULT_UNITS, |u| u.max(0.0))
    }
}

/// One term of a transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SemesterRecord {
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub term: Option<String>,
    /// Free-form label such as "Fall 2023"
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub courses: Vec<CourseRecord>,
}

impl SemesterRecord {
    pub fn new(term: &str, year: i32, courses: Vec<CourseRecord>) -> Self {
        Self {
            year: Some(Value::from(year)),
            term: Some(term.to_string()),
            name: None,
            courses,
        }
    }
}

/// Transcript as produced by the upstream parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedTranscript {
    #[serde(default)]
    pub cumulative_gpa: Option<Value>,
    #[serde(default)]
    pub gpa: Option<Value>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub semesters: Vec<SemesterRecord>,
    /// Flat course list, used when no semester carries courses
    #[serde(default, deserialize_with = "lenient_list")]
    pub courses: Vec<CourseRecord>,
}

impl ParsedTranscript {
    /// Reported cumulative GPA, preferring `cumulative_gpa` over `gpa`
    pub fn reported_gpa(&self) -> Option<f64> {
        self.cumulative_gpa
            .as_ref()
            .and_then(numeric)
            .or_else(|| self.gpa.as_ref().and_then(numeric))
            .filter(|g| g.is_finite())
    }
}

/// Document properties of the uploaded PDF
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfMetadata {
    #[serde(rename = "Creator", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub info_creator: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(rename = "Producer", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub info_producer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(rename = "CreationDate", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub info_creation_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(rename = "ModDate", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub info_mod_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub mod_date: Option<String>,
}

fn first_present<'a>(primary: &'a Option<String>, secondary: &'a Option<String>) -> Option<&'a str> {
    primary
        .as_deref()
        .or(secondary.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl PdfMetadata {
    pub fn creator(&self) -> Option<&str> {
        first_present(&self.info_creator, &self.creator)
    }

    pub fn producer(&self) -> Option<&str> {
        first_present(&self.info_producer, &self.producer)
    }

    pub fn creation_date(&self) -> Option<&str> {
        first_present(&self.info_creation_date, &self.creation_date)
    }

    pub fn mod_date(&self) -> Option<&str> {
        first_present(&self.info_mod_date, &self.mod_date)
    }
}

/// Everything the verifier is given for one transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptInput {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub parsed_transcript: ParsedTranscript,
    #[serde(default, deserialize_with = "lenient_record")]
    pub pdf_metadata: Option<PdfMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Confidence points removed per flag of this severity
    pub fn deduction(self) -> u32 {
        match self {
            Severity::High => 20,
            Severity::Medium => 8,
            Severity::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flag codes raised by the built-in checks
pub mod codes {
    pub const STALE_TRANSCRIPT: &str = "STALE_TRANSCRIPT";
    pub const GPA_MISMATCH_HIGH: &str = "GPA_MISMATCH_HIGH";
    pub const GPA_MISMATCH_MEDIUM: &str = "GPA_MISMATCH_MEDIUM";
    pub const ALL_IDENTICAL_GRADES: &str = "ALL_IDENTICAL_GRADES";
    pub const GPA_SCALE_VIOLATION: &str = "GPA_SCALE_VIOLATION";
    pub const EXCESSIVE_PASS_FAIL: &str = "EXCESSIVE_PASS_FAIL";
    pub const MISSING_SEMESTER: &str = "MISSING_SEMESTER";
    pub const UNIFORM_GRADE_DISTRIBUTION: &str = "UNIFORM_GRADE_DISTRIBUTION";
    pub const ALL_A_GRADES: &str = "ALL_A_GRADES";
    pub const PDF_EDITING_SOFTWARE: &str = "PDF_EDITING_SOFTWARE";
    pub const PDF_MODIFIED_AFTER_CREATION: &str = "PDF_MODIFIED_AFTER_CREATION";
    pub const GENERIC_PDF_CREATOR: &str = "GENERIC_PDF_CREATOR";
}

/// One independently justified verification concern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationFlag {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl VerificationFlag {
    pub fn new(code: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Warning,
    Suspicious,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Warning => "warning",
            VerificationStatus::Suspicious => "suspicious",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub status: VerificationStatus,
    /// 0-100
    pub confidence_score: u8,
    pub flags: Vec<VerificationFlag>,
    pub checks_run: Vec<String>,
    pub summary: String,
}

impl VerificationResult {
    pub fn has_flag(&self, code: &str) -> bool {
        self.flags.iter().any(|f| f.code == code)
    }

    pub fn flags_with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a VerificationFlag> + 'a {
        self.flags.iter().filter(move |f| f.code == code)
    }
}
