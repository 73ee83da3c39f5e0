use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

/// One admitted data line. `values[i]` belongs to `Table::columns[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub values: Vec<String>,
}

impl Row {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

/// Parsed report: ordered columns plus the admitted rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    /// Zero-based index of the detected header among the decoded lines.
    pub header_line: usize,
    pub delimiter: Delimiter,
    /// Name of the codec that produced the text, e.g. `UTF-8` or `GBK`.
    pub encoding: &'static str,
}

impl Table {
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rows as ordered `(column, value)` pairs, for prompt serialization.
    pub fn records(&self) -> impl Iterator<Item = Vec<(&str, &str)>> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .map(String::as_str)
                .zip(row.values.iter().map(String::as_str))
                .collect()
        })
    }
}
