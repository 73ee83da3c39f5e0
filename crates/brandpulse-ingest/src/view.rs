//! Search and sort over ingested rows.
//!
//! Everything here is pure: the same table, search term, and sort key always
//! produce the same ordering, so callers can recompute on every keystroke.

use std::cmp::Ordering;

use serde::Serialize;

use crate::types::{Row, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub fn ascending(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    /// Sort key after the user clicks `column`.
    ///
    /// Clicking the active column flips its direction; any other column
    /// starts ascending.
    #[must_use]
    pub fn toggled(current: Option<&SortKey>, column: &str) -> Self {
        match current {
            Some(key) if key.column == column => Self {
                column: column.to_string(),
                direction: match key.direction {
                    SortDirection::Ascending => SortDirection::Descending,
                    SortDirection::Descending => SortDirection::Ascending,
                },
            },
            _ => Self::ascending(column),
        }
    }
}

/// Rows matching `search`, ordered by `sort`.
///
/// An empty search matches everything. A sort key naming an unknown column
/// leaves rows in file order. In a mixed column, numeric cells always sort
/// before text rather than comparing as strings against it, which keeps the
/// ordering total.
#[must_use]
pub fn visible_rows<'a>(table: &'a Table, search: &str, sort: Option<&SortKey>) -> Vec<&'a Row> {
    let needle = search.trim().to_lowercase();
    let mut rows: Vec<&Row> = table
        .rows
        .iter()
        .filter(|row| matches_search(row, &needle))
        .collect();

    if let Some(key) = sort {
        if let Some(index) = table.column_index(&key.column) {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.get(index).unwrap_or(""), b.get(index).unwrap_or(""));
                match key.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
    }

    rows
}

fn matches_search(row: &Row, needle: &str) -> bool {
    needle.is_empty() || row.values.iter().any(|v| v.to_lowercase().contains(needle))
}

/// Numeric value of a cell after dropping currency marks, separators, and
/// units. `None` when nothing parseable remains.
#[must_use]
pub fn numeric_value(cell: &str) -> Option<f64> {
    let stripped: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
        .collect();
    stripped.parse::<f64>().ok()
}

/// Numbers compare numerically; anything else compares as plain text.
///
/// Numeric cells order before non-numeric ones so mixed columns still get a
/// total order.
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
