//! Tabular ingestion for exported ad-platform reports.
//!
//! Decodes uploaded bytes (UTF-8 with a GBK-family fallback), locates the
//! real header line beneath any report preamble, admits well-formed rows, and
//! exposes a search/sort view over the result.

pub mod decode;
pub mod error;
pub mod parse;
pub mod state;
pub mod types;
pub mod view;

pub use decode::{decode_report, Decoded};
pub use error::IngestError;
pub use parse::{ingest, ingest_text, IngestOptions};
pub use state::{TableAction, TableState};
pub use types::{Delimiter, Row, Table};
pub use view::{visible_rows, SortDirection, SortKey};
