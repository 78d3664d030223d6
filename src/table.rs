//! In-memory source table
//!
//! Every cell is held as the exact text read from the source. Nothing in the
//! pipeline mutates a `RawTable` after loading; derived structures refer back
//! to rows through [`RowId`].

use std::fmt;

/// Position of a data row in the source table (0-based, header excluded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(usize);

impl RowId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cleaned header plus string-typed data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table, padding or truncating every row to the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by its cleaned header name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Original row for `id`, if it exists
    pub fn row(&self, id: RowId) -> Option<&[String]> {
        self.rows.get(id.index()).map(Vec::as_slice)
    }

    /// Iterate rows with their ids in source order
    pub fn rows(&self) -> impl Iterator<Item = (RowId, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (RowId::new(i), row.as_slice()))
    }
}
