use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde_json::json;

use super::CheckContext;
use crate::verification::types::{codes, PdfMetadata, Severity, VerificationFlag};

/// Tools used to alter or fabricate documents
const EDITING_TOOLS: &[&str] = &[
    "photoshop",
    "gimp",
    "illustrator",
    "inkscape",
    "canva",
    "pdfescape",
    "sejda",
    "smallpdf",
    "ilovepdf",
    "pdffiller",
    "dochub",
    "pdf-xchange editor",
    "foxit phantompdf",
    "nitro pro",
];

/// General-purpose authoring tools that registrars rarely use directly
const GENERIC_CREATORS: &[&str] = &[
    "microsoft word",
    "google docs",
    "libreoffice",
    "openoffice",
    "pages",
    "quartz pdfcontext",
    "print to pdf",
    "skia/pdf",
    "wkhtmltopdf",
];

/// Student information systems that produce official transcripts
const SIS_SIGNATURES: &[&str] = &[
    "banner",
    "ellucian",
    "peoplesoft",
    "campus solutions",
    "colleague",
    "workday",
    "jenzabar",
    "parchment",
    "national student clearinghouse",
    "credentials solutions",
    "student information system",
];

fn matching<'a>(haystack: &str, needles: &[&'a str]) -> Option<&'a str> {
    needles.iter().copied().find(|n| haystack.contains(n))
}

pub fn check(ctx: &CheckContext<'_>) -> Vec<VerificationFlag> {
    let Some(metadata) = ctx.metadata else {
        return Vec::new();
    };

    let mut flags = Vec::new();
    flags.extend(detect_editing_software(metadata));
    flags.extend(detect_modification(metadata));
    flags.extend(detect_generic_creator(metadata));
    flags
}

fn software_text(metadata: &PdfMetadata) -> String {
    [metadata.creator(), metadata.producer()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn detect_editing_software(metadata: &PdfMetadata) -> Option<VerificationFlag> {
    let software = software_text(metadata);
    let tool = matching(&software, EDITING_TOOLS)?;
    Some(
        VerificationFlag::new(
            codes::PDF_EDITING_SOFTWARE,
            Severity::High,
            format!("PDF was produced or edited with {tool}"),
        )
        .with_details(json!({
            "tool": tool,
            "creator": metadata.creator(),
            "producer": metadata.producer(),
        })),
    )
}

fn detect_modification(metadata: &PdfMetadata) -> Option<VerificationFlag> {
    let created = metadata.creation_date()?;
    let modified = metadata.mod_date()?;
    let differs = match (parse_pdf_date(created), parse_pdf_date(modified)) {
        (Some(c), Some(m)) => c != m,
        _ => normalize_date_text(created) != normalize_date_text(modified),
    };
    differs.then(|| {
        VerificationFlag::new(
            codes::PDF_MODIFIED_AFTER_CREATION,
            Severity::Medium,
            "PDF modification date differs from its creation date",
        )
        .with_details(json!({ "creation_date": created, "mod_date": modified }))
    })
}

fn detect_generic_creator(metadata: &PdfMetadata) -> Option<VerificationFlag> {
    let software = software_text(metadata);
    let creator = matching(&software, GENERIC_CREATORS)?;
    if matching(&software, SIS_SIGNATURES).is_some() {
        return None;
    }
    Some(
        VerificationFlag::new(
            codes::GENERIC_PDF_CREATOR,
            Severity::Low,
            format!("PDF was created with general-purpose software ({creator}) rather than a student information system"),
        )
        .with_details(json!({ "creator": creator })),
    )
}

fn normalize_date_text(raw: &str) -> String {
    raw.trim().trim_start_matches("D:").replace('\'', "").to_lowercase()
}

/// Parse a PDF date (`D:YYYYMMDDHHmmSS` with optional `Z` or `+HH'mm'` offset)
/// or an RFC 3339 timestamp.
pub fn parse_pdf_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }

    let body = raw.strip_prefix("D:").unwrap_or(raw);
    let digits_len = body.chars().take_while(char::is_ascii_digit).count();
    if digits_len < 4 {
        return None;
    }
    let (digits, zone) = body.split_at(digits_len);

    // Pad missing trailing components: month and day to 01, time to 00
    let mut full = digits.chars().take(14).collect::<String>();
    const DEFAULTS: &str = "00000101000000";
    if full.len() < 14 {
        full.push_str(&DEFAULTS[full.len()..]);
    }
    let naive = NaiveDateTime::parse_from_str(&full, "%Y%m%d%H%M%S").ok()?;

    let offset = parse_offset(zone)?;
    offset.from_local_datetime(&naive).single()
}

fn parse_offset(zone: &str) -> Option<FixedOffset> {
    let zone = zone.trim().replace('\'', "");
    let mut chars = zone.chars();
    let sign = match chars.next() {
        None | Some('Z') | Some('z') => return FixedOffset::east_opt(0),
        Some('+') => 1,
        Some('-') => -1,
        Some(_) => return None,
    };
    let rest: String = chars.collect();
    let hours: i32 = rest.get(0..2)?.parse().ok()?;
    let minutes: i32 = rest.get(2..4).map_or(Ok(0), str::parse).ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
