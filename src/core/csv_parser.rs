//! Contact CSV intake: file type check, header validation and row splitting.
//!
//! Rows are split by a `csv` reader with quoting disabled: every comma
//! separates fields and quoted fields are only trimmed of surrounding quotes.

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::model::ContactRecord;
use crate::core::DashboardError;

/// Header tokens that must each appear (as a substring) in some header column.
pub const REQUIRED_HEADERS: [&str; 3] = ["firstname", "phone", "notes"];

/// Mime types accepted for uploads.
pub const ALLOWED_MIME_TYPES: [&str; 3] = [
    "text/csv",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// File extensions accepted for uploads.
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".csv", ".xls", ".xlsx"];

const MIN_FIELDS: usize = 3;

const UTF8_BOM: char = '\u{feff}';

/// Data row dropped because it had too few fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLine {
    /// 1-based position among the non-blank lines (the header is line 1).
    pub line_number: usize,
    /// Number of comma-separated fields found.
    pub field_count: usize,
}

/// Result of parsing a contact CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCsv {
    /// Parsed records in file order.
    pub records: Vec<ContactRecord>,
    /// Rows skipped for having fewer than three fields.
    pub skipped: Vec<SkippedLine>,
}

/// Accept the file when either its mime type or its extension is allowed.
pub fn validate_file_type(file_name: &str, mime_type: Option<&str>) -> Result<(), DashboardError> {
    if mime_type.is_some_and(|m| ALLOWED_MIME_TYPES.contains(&m)) {
        return Ok(());
    }
    let lower = file_name.to_lowercase();
    let extension = lower.rfind('.').map_or("", |idx| &lower[idx..]);
    if ALLOWED_EXTENSIONS.contains(&extension) {
        Ok(())
    } else {
        Err(DashboardError::UnsupportedFileType(file_name.to_string()))
    }
}

/// Parse contact rows out of CSV text.
///
/// The first non-blank line is the header and must mention `firstname`,
/// `phone` and `notes` (case-insensitive, substring match). Each later line
/// contributes its first three fields positionally; lines with fewer fields
/// are reported in [`ParsedCsv::skipped`].
pub fn parse_contacts(text: &str) -> Result<ParsedCsv, DashboardError> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // short rows are reported, not rejected
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| DashboardError::Validation(format!("unreadable CSV: {e}")))?;
        if row.len() == 1 && row[0].trim().is_empty() {
            continue;
        }
        rows.push(row);
    }
    let mut rows = rows.into_iter();

    let header = rows.next().unwrap_or_default();
    validate_header(&header)?;

    let mut parsed = ParsedCsv::default();
    for (idx, row) in rows.enumerate() {
        let fields: Vec<&str> = row.iter().map(clean_field).collect();
        if fields.len() < MIN_FIELDS {
            let skipped = SkippedLine {
                line_number: idx + 2,
                field_count: fields.len(),
            };
            warn!(
                line = skipped.line_number,
                fields = skipped.field_count,
                "skipping CSV line with too few fields"
            );
            parsed.skipped.push(skipped);
            continue;
        }
        parsed
            .records
            .push(ContactRecord::new(fields[0], fields[1], fields[2]));
    }

    debug!(
        records = parsed.records.len(),
        skipped = parsed.skipped.len(),
        "parsed contact CSV"
    );
    Ok(parsed)
}

fn validate_header(header: &StringRecord) -> Result<(), DashboardError> {
    let tokens: Vec<String> = header
        .iter()
        .map(|h| clean_field(h).to_lowercase())
        .collect();
    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !tokens.iter().any(|t| t.contains(*required)))
        .map(|required| (*required).to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::MalformedHeader { missing })
    }
}

fn clean_field(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim()
}
