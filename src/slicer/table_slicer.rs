//! TableSlicer: independent row and column normalization for double keys.

use hashbrown::HashMap;

use super::{Extent, Key, Slicer};
use crate::table_error::TableError;

/// Row-axis and column-axis slicers for one double-indexing call.
///
/// The row axis is normalized against the row count. The column axis is
/// normalized against the longest row, and is jagged whenever row lengths
/// differ. Rows that end at or before the largest addressed column are
/// recorded so visits past their end can be reported as gaps.
#[derive(Debug)]
pub struct TableSlicer {
    rows: Slicer,
    cols: Slicer,
    short_rows: HashMap<usize, usize>,
}

impl TableSlicer {
    /// Normalize `row_key` and `col_key` against a table with the given row lengths.
    ///
    /// # Errors
    /// Any [`Slicer`] normalization error for either axis.
    pub fn new(row_lengths: &[usize], row_key: Key, col_key: Key) -> Result<Self, TableError> {
        let min = row_lengths.iter().copied().min();
        let max = row_lengths.iter().copied().max();
        Self::with_extents(
            row_lengths,
            Extent::columns(min, max),
            row_key,
            col_key,
        )
    }

    /// As [`new`](Self::new) with a precomputed column extent.
    pub fn with_extents(
        row_lengths: &[usize],
        col_extent: Extent,
        row_key: Key,
        col_key: Key,
    ) -> Result<Self, TableError> {
        let rows = Slicer::with_extent(Extent::uniform(row_lengths.len()), row_key)?;
        let cols = Slicer::with_extent(col_extent, col_key)?;

        let mut short_rows = HashMap::new();
        let max_col = cols.max();
        if !cols.is_empty() {
            for &r in rows.forward() {
                let len = row_lengths[r];
                if isize::try_from(len).map_or(false, |len| len <= max_col) {
                    short_rows.insert(r, len);
                }
            }
        }

        Ok(Self {
            rows,
            cols,
            short_rows,
        })
    }

    #[inline]
    pub fn rows(&self) -> &Slicer {
        &self.rows
    }

    #[inline]
    pub fn cols(&self) -> &Slicer {
        &self.cols
    }

    /// `(row count, column count)` of the addressed block.
    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.rows.size(), self.cols.size())
    }

    /// Whether the cell lies inside its row.
    #[inline]
    pub fn is_present(&self, row: usize, col: usize) -> bool {
        self.short_rows.get(&row).map_or(true, |&len| col < len)
    }

    /// Rows that end at or before the largest addressed column, with their lengths.
    pub fn short_rows(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.short_rows.iter().map(|(&r, &len)| (r, len))
    }

    /// Cells in key order; `None` marks a position past the end of its row.
    pub fn positions(&self) -> impl Iterator<Item = Option<(usize, usize)>> + '_ {
        self.walk(self.rows.forward(), self.cols.forward())
    }

    /// Cells with both axes ascending.
    pub fn positions_increasing(&self) -> impl Iterator<Item = Option<(usize, usize)>> + '_ {
        self.walk(self.rows.increasing(), self.cols.increasing())
    }

    /// Cells with both axes descending.
    pub fn positions_decreasing(&self) -> impl Iterator<Item = Option<(usize, usize)>> + '_ {
        self.walk(self.rows.decreasing(), self.cols.decreasing())
    }

    fn walk<'a>(
        &'a self,
        rows: &'a [usize],
        cols: &'a [usize],
    ) -> impl Iterator<Item = Option<(usize, usize)>> + 'a {
        rows.iter().flat_map(move |&r| {
            cols.iter()
                .map(move |&c| self.is_present(r, c).then_some((r, c)))
        })
    }
}
