//! Report file loading and table printing for `ingest` and `sem diagnose`.

use std::path::Path;

use anyhow::Context;
use brandpulse_ingest::{Table, TableAction, TableState};
use clap::Args;

/// Search and sort flags applied to the ingested table.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Keep rows where any cell contains this text (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Maximum number of rows to print
    #[arg(long, default_value = "50")]
    pub limit: usize,
}

/// Read and ingest a report file.
///
/// A rejected upload is reported through the table state's notice.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no usable rows.
pub(crate) fn load_report(path: &Path) -> anyhow::Result<Table> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let state = match brandpulse_ingest::ingest(&bytes, brandpulse_ingest::IngestOptions::default())
    {
        Ok(table) => TableState::default().reduce(TableAction::Loaded(table)),
        Err(e) => TableState::default().reduce(TableAction::Rejected(e.to_string())),
    };
    match state.table {
        Some(table) => Ok(table),
        None => anyhow::bail!(
            "{}: {}",
            path.display(),
            state.notice.unwrap_or_default()
        ),
    }
}

/// Apply the view flags to a freshly loaded table.
#[must_use]
pub(crate) fn apply_view(table: Table, view: &ViewArgs) -> TableState {
    let mut state = TableState::default().reduce(TableAction::Loaded(table));
    if let Some(search) = &view.search {
        state = state.reduce(TableAction::Search(search.clone()));
    }
    if let Some(column) = &view.sort {
        state = state.reduce(TableAction::SortBy(column.clone()));
        // A second toggle on the same column flips to descending.
        if view.desc {
            state = state.reduce(TableAction::SortBy(column.clone()));
        }
    }
    state
}

/// Load a report, apply search/sort, and print it.
///
/// # Errors
///
/// Returns an error if the report cannot be loaded or the sort column is
/// not one of the table's columns.
pub(crate) fn run_ingest(path: &Path, view: &ViewArgs) -> anyhow::Result<()> {
    let table = load_report(path)?;
    if let Some(column) = &view.sort {
        if table.column_index(column).is_none() {
            anyhow::bail!(
                "unknown sort column '{column}'; available: {}",
                table.columns.join(", ")
            );
        }
    }
    println!(
        "{} rows, {} columns (encoding {}, header at line {})",
        table.rows.len(),
        table.columns.len(),
        table.encoding,
        table.header_line + 1
    );

    let state = apply_view(table, view);
    let Some(table) = state.table.as_ref() else {
        return Ok(());
    };
    let rows = state.visible_rows();
    println!("{}", table.columns.join("\t"));
    for row in rows.iter().take(view.limit) {
        println!("{}", row.values.join("\t"));
    }
    if rows.len() > view.limit {
        println!("... {} more rows", rows.len() - view.limit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use brandpulse_ingest::{ingest_text, IngestOptions, SortDirection};

    use super::*;

    fn table() -> Table {
        ingest_text(
            "Keyword,Impressions,Clicks\nshoes,100,5\nboots,300,9\nsandals,200,1\n",
            IngestOptions::default(),
        )
        .unwrap()
    }

    fn view(search: Option<&str>, sort: Option<&str>, desc: bool) -> ViewArgs {
        ViewArgs {
            search: search.map(ToOwned::to_owned),
            sort: sort.map(ToOwned::to_owned),
            desc,
            limit: 50,
        }
    }

    #[test]
    fn desc_flag_sorts_descending() {
        let state = apply_view(table(), &view(None, Some("Impressions"), true));
        let sort = state.sort.clone().unwrap();
        assert_eq!(sort.direction, SortDirection::Descending);
        let first: Vec<&str> = state
            .visible_rows()
            .iter()
            .map(|r| r.values[0].as_str())
            .collect();
        assert_eq!(first, vec!["boots", "sandals", "shoes"]);
    }

    #[test]
    fn search_filters_rows() {
        let state = apply_view(table(), &view(Some("BOOT"), None, false));
        assert_eq!(state.visible_rows().len(), 1);
    }

    #[test]
    fn unreadable_report_is_rejected_with_notice() {
        let dir = std::env::temp_dir().join(format!("brandpulse-empty-{}", std::process::id()));
        std::fs::write(&dir, "only one line\n").unwrap();
        let err = load_report(&dir).unwrap_err();
        std::fs::remove_file(&dir).ok();
        assert!(err.to_string().contains("brandpulse-empty"));
    }
}
