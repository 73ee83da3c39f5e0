//! View model for the report table, updated through a single reducer.

use crate::types::{Row, Table};
use crate::view::{visible_rows, SortKey};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub table: Option<Table>,
    pub search: String,
    pub sort: Option<SortKey>,
    /// Notice shown for a rejected upload.
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum TableAction {
    Loaded(Table),
    Rejected(String),
    Search(String),
    SortBy(String),
    Cleared,
}

impl TableState {
    /// Apply one user action, returning the next state.
    #[must_use]
    pub fn reduce(self, action: TableAction) -> Self {
        match action {
            TableAction::Loaded(table) => Self {
                table: Some(table),
                ..Self::default()
            },
            TableAction::Rejected(message) => Self {
                notice: Some(message),
                ..self
            },
            TableAction::Search(search) => Self { search, ..self },
            TableAction::SortBy(column) => {
                let sort = Some(SortKey::toggled(self.sort.as_ref(), &column));
                Self { sort, ..self }
            }
            TableAction::Cleared => Self::default(),
        }
    }

    #[must_use]
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.table
            .as_ref()
            .map(|t| visible_rows(t, &self.search, self.sort.as_ref()))
            .unwrap_or_default()
    }
}
