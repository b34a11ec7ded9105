//! Table layout shared by the table-capable renderers
//!
//! Rows need not have the same number of cells. The layout has as many columns
//! as the widest row, and each column takes the alignment of the last cell in
//! that column that declares one.

use crate::ast::{Table, TableRow};
use crate::style::Alignment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub columns: usize,
    pub alignments: Vec<Option<Alignment>>,
}

impl TableLayout {
    pub fn of(table: &Table) -> Self {
        let columns = table.column_count();
        let mut alignments = vec![None; columns];
        for row in table.rows() {
            for (column, cell) in row.cells.iter().enumerate() {
                if let Some(alignment) = cell.alignment() {
                    alignments[column] = Some(alignment);
                }
            }
        }
        TableLayout {
            columns,
            alignments,
        }
    }

    pub fn alignment(&self, column: usize) -> Option<Alignment> {
        self.alignments.get(column).copied().flatten()
    }

    /// Empty cells needed to fill `row` up to the column count.
    pub fn missing_cells(&self, row: &TableRow) -> usize {
        self.columns.saturating_sub(row.cells.len())
    }
}
