//! Final table assembly.

use serde::Serialize;

use crate::mapper::{MapperConfig, OutputRow};

/// The assembled spreadsheet: optional header row plus deduplicated data
/// rows, columns in configuration order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputTable {
    /// Display-name header row, present only when requested.
    pub header: Option<Vec<String>>,
    /// Data rows in output order.
    pub rows: Vec<Vec<String>>,
}

impl OutputTable {
    /// Compose the final table from resolved, deduplicated rows.
    ///
    /// When `include_header` is set, the header row carries each column's
    /// display name (override if declared, else the column name), sub-header
    /// names immediately after their parent. No further transformation is
    /// applied to the rows.
    pub fn assemble(rows: Vec<OutputRow>, config: &MapperConfig, include_header: bool) -> Self {
        let header = include_header.then(|| config.display_row());
        let rows = rows.into_iter().map(|row| row.cells).collect();

        Self { header, rows }
    }

    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All rows in serialization order, header first when present.
    pub fn iter_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.header.iter().chain(self.rows.iter())
    }
}
