//! Normalised view of a parsed transcript that the checks operate on.

use super::grades::Grade;
use super::terms::{semester_key, TermKey};
use super::types::{CourseRecord, ParsedTranscript};

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Grade text as written, upper-cased and trimmed
    pub grade_text: String,
    pub grade: Grade,
    pub units: f64,
}

impl Course {
    fn from_record(record: &CourseRecord) -> Self {
        let grade_text = record.grade_text().unwrap_or_default().to_uppercase();
        Self {
            grade: Grade::classify(&grade_text),
            grade_text,
            units: record.unit_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    /// None when the term or year could not be determined
    pub key: Option<TermKey>,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranscriptRecord {
    pub reported_gpa: Option<f64>,
    pub semesters: Vec<Semester>,
    /// Every course, in transcript order
    pub courses: Vec<Course>,
}

impl TranscriptRecord {
    pub fn from_parsed(parsed: &ParsedTranscript) -> Self {
        let semesters: Vec<Semester> = parsed
            .semesters
            .iter()
            .map(|semester| Semester {
                key: semester_key(semester),
                courses: semester.courses.iter().map(Course::from_record).collect(),
            })
            .collect();

        let mut courses: Vec<Course> = semesters
            .iter()
            .flat_map(|s| s.courses.iter().cloned())
            .collect();
        if courses.is_empty() {
            courses = parsed.courses.iter().map(Course::from_record).collect();
        }

        Self {
            reported_gpa: parsed.reported_gpa(),
            semesters,
            courses,
        }
    }

    /// Chronologically latest identifiable term
    pub fn latest_term(&self) -> Option<TermKey> {
        self.semesters.iter().filter_map(|s| s.key).max()
    }

    /// Courses that carry grade points
    pub fn graded_courses(&self) -> impl Iterator<Item = &Course> + '_ {
        self.courses.iter().filter(|c| c.grade.points().is_some())
    }

    /// Grade points of every graded course
    pub fn grade_points(&self) -> Vec<f64> {
        self.courses.iter().filter_map(|c| c.grade.points()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::terms::Term;
    use crate::verification::types::SemesterRecord;

    #[test]
    fn test_flat_course_fallback() {
        let parsed = ParsedTranscript {
            courses: vec![CourseRecord::new("A", 3.0), CourseRecord::new("P", 1.0)],
            ..ParsedTranscript::default()
        };
        let record = TranscriptRecord::from_parsed(&parsed);
        assert_eq!(record.courses.len(), 2);
        assert_eq!(record.graded_courses().count(), 1);
    }

    #[test]
    fn test_semester_courses_take_precedence() {
        let parsed = ParsedTranscript {
            semesters: vec![SemesterRecord::new("Fall", 2023, vec![CourseRecord::new("B", 3.0)])],
            courses: vec![CourseRecord::new("A", 3.0), CourseRecord::new("A", 3.0)],
            ..ParsedTranscript::default()
        };
        let record = TranscriptRecord::from_parsed(&parsed);
        assert_eq!(record.courses.len(), 1);
        assert_eq!(record.grade_points(), vec![3.0]);
    }

    #[test]
    fn test_latest_term() {
        let parsed = ParsedTranscript {
            semesters: vec![
                SemesterRecord::new("Fall", 2023, Vec::new()),
                SemesterRecord::new("Summer", 2024, Vec::new()),
                SemesterRecord::new("Spring", 2024, Vec::new()),
            ],
            ..ParsedTranscript::default()
        };
        let record = TranscriptRecord::from_parsed(&parsed);
        assert_eq!(record.latest_term(), Some(TermKey::new(Term::Summer, 2024)));
    }
}
