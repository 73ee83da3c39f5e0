use thiserror::Error;

/// Recoverable ingestion failures, reported to the user as an invalid upload.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file has fewer than 2 non-empty lines")]
    Empty,

    #[error("no data rows remained after cleaning (header at line {header_line})")]
    NoRows { header_line: usize },

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),
}
