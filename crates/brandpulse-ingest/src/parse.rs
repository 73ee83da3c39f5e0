//! Header sniffing, delimiter detection, and row admission.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::decode::decode_report;
use crate::error::IngestError;
use crate::types::{Delimiter, Row, Table};

/// Only this many leading lines are considered when looking for the header.
pub const HEADER_SCAN_LINES: usize = 15;

/// A header line must mention at least this many distinct keywords.
pub const HEADER_MIN_MATCHES: usize = 2;

/// Column names typical of search-ad exports, in English and Chinese.
const HEADER_KEYWORDS: &[&str] = &[
    "date",
    "campaign",
    "keyword",
    "impression",
    "click",
    "cost",
    "日期",
    "计划",
    "关键词",
    "展现",
    "点击",
    "消费",
];

/// Column-name fragments identifying the impressions column.
const IMPRESSION_KEYWORDS: &[&str] = &["impression", "展现"];

#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Force a delimiter instead of detecting it from the header line.
    pub delimiter: Option<Delimiter>,
}

/// Decode and parse an uploaded report.
///
/// # Errors
///
/// Returns [`IngestError::Empty`] for files with fewer than two non-empty
/// lines and [`IngestError::NoRows`] when every data row was rejected.
pub fn ingest(bytes: &[u8], options: IngestOptions) -> Result<Table, IngestError> {
    let decoded = decode_report(bytes);
    let mut table = ingest_text(&decoded.text, options)?;
    table.encoding = decoded.encoding;
    Ok(table)
}

/// Parse already-decoded report text.
///
/// # Errors
///
/// See [`ingest`].
pub fn ingest_text(text: &str, options: IngestOptions) -> Result<Table, IngestError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.iter().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(IngestError::Empty);
    }

    let header_line = detect_header_line(&lines);
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| detect_delimiter(lines[header_line]));

    let columns: Vec<String> = split_line(lines[header_line], delimiter)?
        .iter()
        .map(clean_field)
        .collect();
    let impression_col = impression_column(&columns);

    let mut rows = Vec::new();
    let mut short = 0usize;
    let mut zero_impressions = 0usize;

    // Each line is parsed on its own so an unbalanced quote cannot swallow
    // the rows after it.
    for line in &lines[header_line + 1..] {
        if line.trim().is_empty() {
            continue;
        }
        let fields = match split_line(line, delimiter) {
            Ok(fields) if fields.iter().all(str::is_empty) => continue,
            Ok(fields) if fields.len() * 2 >= columns.len() => fields,
            _ => {
                short += 1;
                continue;
            }
        };

        let mut values: Vec<String> = fields.iter().map(clean_field).collect();
        values.resize(columns.len(), String::new());

        if impression_col.is_some_and(|i| values[i] == "0") {
            zero_impressions += 1;
            continue;
        }
        rows.push(Row { values });
    }

    tracing::debug!(
        header_line,
        ?delimiter,
        columns = columns.len(),
        admitted = rows.len(),
        short,
        zero_impressions,
        "ingested report"
    );

    if rows.is_empty() {
        return Err(IngestError::NoRows { header_line });
    }

    Ok(Table {
        columns,
        rows,
        header_line,
        delimiter,
        encoding: "UTF-8",
    })
}

/// Index of the first line among the leading [`HEADER_SCAN_LINES`] that
/// mentions at least [`HEADER_MIN_MATCHES`] header keywords, else the first
/// non-blank line.
#[must_use]
pub fn detect_header_line(lines: &[&str]) -> usize {
    lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .position(|line| {
            let lower = line.to_lowercase();
            HEADER_KEYWORDS
                .iter()
                .filter(|kw| lower.contains(*kw))
                .count()
                >= HEADER_MIN_MATCHES
        })
        .or_else(|| lines.iter().position(|line| !line.trim().is_empty()))
        .unwrap_or(0)
}

#[must_use]
pub fn detect_delimiter(header: &str) -> Delimiter {
    if header.contains('\t') {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

fn impression_column(columns: &[String]) -> Option<usize> {
    columns.iter().position(|c| {
        let lower = c.to_lowercase();
        IMPRESSION_KEYWORDS.iter().any(|kw| lower.contains(kw))
    })
}

/// Split one physical line into raw fields.
fn split_line(line: &str, delimiter: Delimiter) -> Result<StringRecord, IngestError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    match reader.records().next() {
        Some(record) => Ok(record?),
        None => Ok(StringRecord::new()),
    }
}

/// Trim whitespace and strip one layer of surrounding double quotes.
fn clean_field(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let unquoted = unquoted.strip_suffix('"').unwrap_or(unquoted);
    unquoted.trim().to_string()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
