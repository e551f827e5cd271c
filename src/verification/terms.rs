//! Academic term parsing and ordering.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use super::types::SemesterRecord;
use crate::scoring::score_normalizer::numeric;

/// Term within an academic year, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Term {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Term {
    pub fn as_str(self) -> &'static str {
        match self {
            Term::Winter => "Winter",
            Term::Spring => "Spring",
            Term::Summer => "Summer",
            Term::Fall => "Fall",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "winter" | "wi" => Some(Term::Winter),
            "spring" | "sp" => Some(Term::Spring),
            "summer" | "su" => Some(Term::Summer),
            "fall" | "autumn" | "fa" => Some(Term::Fall),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A specific term of a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TermKey {
    pub year: i32,
    pub term: Term,
}

impl TermKey {
    pub fn new(term: Term, year: i32) -> Self {
        Self { year, term }
    }

    /// Next term in the Spring/Fall alternation
    pub fn next_regular(self) -> Self {
        match self.term {
            Term::Fall => TermKey::new(Term::Spring, self.year + 1),
            _ => TermKey::new(Term::Fall, self.year),
        }
    }

    pub fn is_regular(self) -> bool {
        matches!(self.term, Term::Spring | Term::Fall)
    }
}

impl fmt::Display for TermKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.term, self.year)
    }
}

static TERM_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(winter|spring|summer|fall|autumn)\b")
        .expect("term pattern is valid")
});

// Registrar shorthand such as "FA23" or "SP2024"
static TERM_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(wi|sp|su|fa)\s*'?(\d{2}|\d{4})?\s*$")
        .expect("term code pattern is valid")
});

static YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:19|20)\d{2})\b").expect("year pattern is valid")
});

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

fn plausible_year(year: i32) -> Option<i32> {
    (MIN_YEAR..=MAX_YEAR).contains(&year).then_some(year)
}

/// Parse a term label, returning the term and any year embedded in it
pub fn parse_label(label: &str) -> (Option<Term>, Option<i32>) {
    if let Some(caps) = TERM_CODE.captures(label) {
        let term = caps.get(1).and_then(|m| Term::from_word(m.as_str()));
        let year = caps.get(2).and_then(|m| {
            let digits = m.as_str();
            let value = digits.parse::<i32>().ok()?;
            plausible_year(if digits.len() == 2 { 2000 + value } else { value })
        });
        return (term, year);
    }

    let term = TERM_WORD
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Term::from_word(m.as_str()));
    let year = YEAR
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok())
        .and_then(plausible_year);
    (term, year)
}

/// Resolve a semester's (term, year), from explicit fields first, then its labels
pub fn semester_key(semester: &SemesterRecord) -> Option<TermKey> {
    let explicit_year = semester
        .year
        .as_ref()
        .and_then(numeric)
        .filter(|y| y.is_finite() && y.fract() == 0.0)
        .and_then(|y| plausible_year(y as i32));

    let labels = [semester.term.as_deref(), semester.name.as_deref()];
    let mut term = None;
    let mut label_year = None;
    for label in labels.into_iter().flatten() {
        let (t, y) = parse_label(label);
        term = term.or(t);
        label_year = label_year.or(y);
    }

    Some(TermKey::new(term?, explicit_year.or(label_year)?))
}

/// Most recent term a current transcript should show.
///
/// With a graduation year in the past, that is the Spring of the graduation
/// year. Otherwise it depends on the month: January to May expects the
/// previous Fall, June to December the current Spring.
pub fn expected_latest_term(reference: NaiveDate, graduation_year: Option<i32>) -> TermKey {
    let year = reference.year();
    match graduation_year {
        Some(grad) if grad < year => TermKey::new(Term::Spring, grad),
        _ if reference.month() <= 5 => TermKey::new(Term::Fall, year - 1),
        _ => TermKey::new(Term::Spring, year),
    }
}
