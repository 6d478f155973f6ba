//! Row-major cell search and whole-row search.

use std::ops::Range;

use super::Table;
use crate::sequence::search::search_window;
use crate::slicer::{Extent, SliceRange};
use crate::table_error::TableError;
use crate::value::Value;

/// Row-major search window over table cells.
///
/// `start` is an inclusive `(row, col)` position. `stop` is
/// `(exclusive row bound, exclusive column bound within the final row)`;
/// a stop column of 0 ends the window at the end of the previous row.
/// Negative parts count from the end of their axis. Omitted parts cover
/// the whole table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellRange {
    pub start: Option<(isize, isize)>,
    pub stop: Option<(isize, isize)>,
}

impl CellRange {
    pub const FULL: CellRange = CellRange::new(None, None);

    pub const fn new(start: Option<(isize, isize)>, stop: Option<(isize, isize)>) -> Self {
        Self { start, stop }
    }

    /// From `start` to the end of the table.
    pub const fn starting_at(start: (isize, isize)) -> Self {
        Self::new(Some(start), None)
    }

    /// From the first cell up to `stop`.
    pub const fn until(stop: (isize, isize)) -> Self {
        Self::new(None, Some(stop))
    }
}

/// Normalized window: first cell, last row, and stop column within the last row.
#[derive(Clone, Copy, Debug)]
struct CellWindow {
    start_row: usize,
    start_col: usize,
    last_row: usize,
    stop_col: usize,
}

impl CellWindow {
    fn columns(self, row: usize, len: usize) -> Range<usize> {
        let from = if row == self.start_row { self.start_col } else { 0 };
        let to = if row == self.last_row { self.stop_col.min(len) } else { len };
        from.min(to)..to
    }

    fn cells(self, lengths: &[usize]) -> impl DoubleEndedIterator<Item = (usize, usize)> + '_ {
        (self.start_row..=self.last_row)
            .flat_map(move |r| self.columns(r, lengths[r]).map(move |c| (r, c)))
    }
}

fn normalize_stop(bound: isize, len: usize) -> Result<usize, TableError> {
    let signed = isize::try_from(len).unwrap_or(isize::MAX);
    if bound < -signed || bound > signed {
        return Err(TableError::IndexOutOfRange { index: bound, len });
    }
    let bound = if bound < 0 { bound + signed } else { bound };
    Ok(bound.unsigned_abs())
}

impl Table {
    fn cell_window(&self, range: CellRange) -> Result<CellWindow, TableError> {
        let lengths = self.row_lengths();
        let rows = lengths.len();
        if rows == 0 {
            return Err(TableError::RangeIsEmpty);
        }

        let (start_row, start_col) = match range.start {
            Some((row, col)) => {
                let row = Extent::uniform(rows).normalize_index(row)?;
                (row, Extent::uniform(lengths[row]).normalize_index(col)?)
            }
            None => (0, 0),
        };
        let (stop_row, stop_col) = match range.stop {
            Some((row, col)) => {
                let row = normalize_stop(row, rows)?;
                if row == 0 {
                    return Err(TableError::RangeIsEmpty);
                }
                (row, normalize_stop(col, lengths[row - 1])?)
            }
            None => (rows, lengths[rows - 1]),
        };

        let (mut last_row, mut stop_col) = (stop_row - 1, stop_col);
        if stop_col == 0 {
            if last_row == 0 {
                return Err(TableError::RangeIsEmpty);
            }
            last_row -= 1;
            stop_col = lengths[last_row];
        }
        if start_row > last_row || (start_row == last_row && start_col >= stop_col) {
            return Err(TableError::RangeIsEmpty);
        }
        Ok(CellWindow {
            start_row,
            start_col,
            last_row,
            stop_col,
        })
    }

    fn holds(&self, (r, c): (usize, usize), value: &Value) -> bool {
        &self.rows[r].as_slice()[c] == value
    }

    /// First `(row, col)` holding `value`, scanning row-major.
    ///
    /// # Errors
    /// `ValueNotFound` on a miss; `RangeIsEmpty` when there is nothing to scan.
    pub fn find_cell(&self, value: &Value) -> Result<(usize, usize), TableError> {
        self.find_cell_in(value, CellRange::FULL)
    }

    /// First `(row, col)` holding `value` inside `range`.
    pub fn find_cell_in(&self, value: &Value, range: CellRange) -> Result<(usize, usize), TableError> {
        self.cell_window(range)?
            .cells(self.row_lengths())
            .find(|&pos| self.holds(pos, value))
            .ok_or(TableError::ValueNotFound)
    }

    /// Last `(row, col)` holding `value`.
    pub fn rfind_cell(&self, value: &Value) -> Result<(usize, usize), TableError> {
        self.rfind_cell_in(value, CellRange::FULL)
    }

    pub fn rfind_cell_in(&self, value: &Value, range: CellRange) -> Result<(usize, usize), TableError> {
        self.cell_window(range)?
            .cells(self.row_lengths())
            .rev()
            .find(|&pos| self.holds(pos, value))
            .ok_or(TableError::ValueNotFound)
    }

    /// Number of cells holding `value`.
    pub fn count_cells(&self, value: &Value) -> Result<usize, TableError> {
        self.count_cells_in(value, CellRange::FULL)
    }

    pub fn count_cells_in(&self, value: &Value, range: CellRange) -> Result<usize, TableError> {
        Ok(self
            .cell_window(range)?
            .cells(self.row_lengths())
            .filter(|&pos| self.holds(pos, value))
            .count())
    }

    /// Every `(row, col)` holding `value`, row-major.
    pub fn find_all_cells(&self, value: &Value) -> Result<Vec<(usize, usize)>, TableError> {
        self.find_all_cells_in(value, CellRange::FULL)
    }

    pub fn find_all_cells_in(
        &self,
        value: &Value,
        range: CellRange,
    ) -> Result<Vec<(usize, usize)>, TableError> {
        Ok(self
            .cell_window(range)?
            .cells(self.row_lengths())
            .filter(|&pos| self.holds(pos, value))
            .collect())
    }

    /// Index of the first row equal to `row`.
    ///
    /// # Errors
    /// `ValueNotFound` on a miss; `RangeIsEmpty` for a table with no rows.
    pub fn find_row(&self, row: &[Value]) -> Result<usize, TableError> {
        self.find_row_in(row, SliceRange::FULL)
    }

    /// Index of the first row equal to `row` inside `window`.
    pub fn find_row_in(&self, row: &[Value], window: impl Into<SliceRange>) -> Result<usize, TableError> {
        search_window(self.len(), &window.into())?
            .find(|&i| self.rows[i].as_slice() == row)
            .ok_or(TableError::ValueNotFound)
    }

    /// Number of rows equal to `row`.
    pub fn count_rows(&self, row: &[Value]) -> Result<usize, TableError> {
        let window = search_window(self.len(), &SliceRange::FULL)?;
        Ok(self.rows[window].iter().filter(|r| r.as_slice() == row).count())
    }
}
