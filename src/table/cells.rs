//! Double indexing: single cells and rectangular blocks.
//!
//! Row keys are normalized against the row count and column keys against
//! the longest row (see [`TableSlicer`]). Reads report cells past the end
//! of a short row as [`Value::Absent`]; writes pad short rows with
//! `Absent` as long as every padded cell is also written.

use super::Table;
use crate::debug_invariants::DebugInvariants;
use crate::sequence::{Sequence, collect_checked};
use crate::slicer::{Extent, Key, Slicer, TableSlicer};
use crate::table_error::TableError;
use crate::value::Value;

/// Result of [`Table::rect`].
#[derive(Clone, Debug, PartialEq)]
pub enum RectSelection {
    /// Exactly one row was addressed.
    Row(Sequence),
    /// Two or more rows, or none, were addressed.
    Table(Table),
}

impl Table {
    fn cell_position(&self, row: isize, col: isize) -> Result<(usize, usize), TableError> {
        let r = Extent::uniform(self.len()).normalize_index(row)?;
        let c = self.column_extent().normalize_index(col)?;
        if c >= self.rows[r].len() {
            return Err(TableError::CellOutOfRange { row: r, col: c });
        }
        Ok((r, c))
    }

    /// Value at `(row, col)`.
    ///
    /// # Errors
    /// `IndexOutOfRange` or `AmbiguousBoundInJaggedTable` from normalization;
    /// `CellOutOfRange` if `col` lies past the end of that row.
    pub fn cell(&self, row: isize, col: isize) -> Result<&Value, TableError> {
        let (r, c) = self.cell_position(row, col)?;
        Ok(&self.rows[r].as_slice()[c])
    }

    /// Replace the value at `(row, col)`.
    ///
    /// # Errors
    /// As [`cell`](Self::cell), plus `TypeMismatch` and `InvalidRow`.
    pub fn set_cell(&mut self, row: isize, col: isize, value: impl Into<Value>) -> Result<(), TableError> {
        let (r, c) = self.cell_position(row, col)?;
        let value = value.into();
        self.constraint.check(&value)?;
        if self.row_type.has_check() {
            let mut staged = self.rows[r].to_vec();
            staged[c] = value;
            self.row_type.validate(&staged)?;
            *self.rows[r].items_mut() = staged;
        } else {
            self.rows[r].items_mut()[c] = value;
        }
        crate::table_debug_assert_ok!(self.validate_invariants(), "Table::set_cell");
        Ok(())
    }

    /// A pair of single indices must name an existing cell.
    fn check_concrete_cell(&self, rows: Key, cols: Key) -> Result<(), TableError> {
        match (rows, cols) {
            (Key::Index(row), Key::Index(col)) => self.cell_position(row, col).map(|_| ()),
            _ => Ok(()),
        }
    }

    fn table_slicer(&self, rows: Key, cols: Key) -> Result<TableSlicer, TableError> {
        TableSlicer::with_extents(self.row_lengths(), self.column_extent(), rows, cols)
    }

    /// Copy of the block addressed by `rows` × `cols`.
    ///
    /// Cells past the end of a short row read as `Absent`. A key addressing
    /// exactly one row yields [`RectSelection::Row`].
    ///
    /// # Errors
    /// `CellOutOfRange` when both keys are single indices and the cell lies
    /// past the end of its row; otherwise a normalization error.
    ///
    /// # Example
    /// ```rust
    /// # fn try_main() -> Result<(), jagged_table::table_error::TableError> {
    /// use jagged_table::prelude::*;
    /// let table = Table::new([values![1, 2, 3], values![4], values![5, 6]])?;
    /// let RectSelection::Table(block) = table.rect(0..3, 0..3)? else { unreachable!() };
    /// assert_eq!(block.cell(1, 2)?, &Value::Absent);
    /// assert!(table.cell(1, 2).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn rect(&self, rows: impl Into<Key>, cols: impl Into<Key>) -> Result<RectSelection, TableError> {
        let (rows, cols) = (rows.into(), cols.into());
        self.check_concrete_cell(rows, cols)?;
        let ts = self.table_slicer(rows, cols)?;
        let block: Vec<Vec<Value>> = ts
            .rows()
            .forward()
            .iter()
            .map(|&r| {
                let row = self.rows[r].as_slice();
                ts.cols()
                    .forward()
                    .iter()
                    .map(|&c| if ts.is_present(r, c) { row[c].clone() } else { Value::Absent })
                    .collect()
            })
            .collect();

        if ts.rows().size() == 1 {
            let cells = block.into_iter().next().unwrap_or_default();
            return Ok(RectSelection::Row(Sequence::from_checked(self.constraint, cells)));
        }
        let rows = block
            .into_iter()
            .map(|cells| Sequence::from_checked(self.constraint, cells))
            .collect();
        Ok(RectSelection::Table(Table::from_parts(
            self.constraint,
            self.row_type,
            rows,
            None,
        )))
    }

    /// Overwrite the block addressed by `rows` × `cols` with `block`.
    ///
    /// `block` holds one entry per addressed row. A single-column key takes
    /// one-element rows; an extended column step takes rows exactly as long
    /// as the column range. Step 1 column ranges splice, so they may grow
    /// or shrink a row. Rows that end before the addressed columns are
    /// padded with `Absent`, provided every padded cell is also written.
    ///
    /// # Errors
    /// `CellOutOfRange` when both keys are single indices and the cell lies
    /// past the end of its row; `CannotResizeViaDoubleIndex`,
    /// `JaggedAssignmentMismatch`, `DisjointSliceWrite`, `TypeMismatch`, `InvalidRow`, or a
    /// normalization error; nothing changes on error.
    pub fn set_rect<R, I, V>(&mut self, rows: impl Into<Key>, cols: impl Into<Key>, block: R) -> Result<(), TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let (rows, cols) = (rows.into(), cols.into());
        self.check_concrete_cell(rows, cols)?;
        let ts = self.table_slicer(rows, cols)?;
        let block = block
            .into_iter()
            .map(|row| collect_checked(row, self.constraint))
            .collect::<Result<Vec<_>, _>>()?;

        let (row_count, col_count) = ts.size();
        if block.len() != row_count {
            return Err(TableError::CannotResizeViaDoubleIndex {
                expected: row_count,
                found: block.len(),
            });
        }
        let cols = ts.cols();
        let expected = if cols.is_single() {
            Some(1)
        } else if cols.step() != 1 {
            Some(col_count)
        } else {
            None
        };
        if let Some(expected) = expected {
            if let Some(row) = block.iter().find(|row| row.len() != expected) {
                return Err(TableError::JaggedAssignmentMismatch {
                    expected,
                    found: row.len(),
                });
            }
        }

        let mut staged = Vec::with_capacity(row_count);
        for (&r, cells) in ts.rows().forward().iter().zip(block) {
            let len = self.rows[r].len();
            let Some(fill) = required_len(cols, len) else {
                log::warn!("rejecting write beyond the end of row {r} (length {len})");
                return Err(TableError::DisjointSliceWrite { row: r });
            };
            let mut items = self.rows[r].to_vec();
            if fill > len {
                log::debug!("padding row {r} from {len} to {fill} cells");
                items.resize(fill, Value::Absent);
            }
            cols.assign(&mut items, cells)?;
            self.row_type.validate(&items)?;
            staged.push((r, items));
        }

        for (r, items) in staged {
            *self.rows[r].items_mut() = items;
        }
        self.structure_changed();
        Ok(())
    }

    /// Remove the addressed cells that exist in each addressed row.
    ///
    /// # Errors
    /// `CellOutOfRange` when both keys are single indices and the cell lies
    /// past the end of its row; `InvalidRow` or a normalization error.
    pub fn delete_rect(&mut self, rows: impl Into<Key>, cols: impl Into<Key>) -> Result<(), TableError> {
        let (rows, cols) = (rows.into(), cols.into());
        self.check_concrete_cell(rows, cols)?;
        let ts = self.table_slicer(rows, cols)?;

        let mut staged = Vec::with_capacity(ts.rows().size());
        for &r in ts.rows().decreasing() {
            let mut items = self.rows[r].to_vec();
            ts.cols().remove(&mut items);
            self.row_type.validate(&items)?;
            staged.push((r, items));
        }

        for (r, items) in staged {
            *self.rows[r].items_mut() = items;
        }
        self.structure_changed();
        Ok(())
    }
}

/// Length a row of `len` cells must reach before `cols` is written into it,
/// or `None` if the write would leave a created cell unwritten.
fn required_len(cols: &Slicer, len: usize) -> Option<usize> {
    let end = isize::try_from(len).unwrap_or(isize::MAX);
    if cols.is_empty() {
        return (cols.start() <= end).then_some(len);
    }
    let reach = if cols.is_extended() { cols.max() } else { cols.min() };
    if reach > end {
        return None;
    }
    Some(len.max(cols.max().unsigned_abs() + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slicer::SliceRange;

    fn cols(len: usize, range: SliceRange) -> Slicer {
        Slicer::new(len, range).unwrap()
    }

    #[test]
    fn required_len_follows_addressed_columns() {
        // 1..4 on a row of 2: pad to 4
        assert_eq!(required_len(&cols(4, SliceRange::from(1..4)), 2), Some(4));
        // 3..4 on a row of 2: cell 2 would be left unwritten
        assert_eq!(required_len(&cols(4, SliceRange::from(3..4)), 2), None);
        // {1, 3} on a row of 3: pad one
        let stepped = SliceRange::from(1..4).with_step(2);
        assert_eq!(required_len(&cols(4, stepped), 3), Some(4));
        assert_eq!(required_len(&cols(4, stepped), 2), None);
        // descending 3, 2 on a row of 2
        let down = SliceRange::new(Some(3), Some(1), Some(-1));
        assert_eq!(required_len(&cols(4, down), 2), Some(4));
        // insertion point at the row end
        assert_eq!(required_len(&cols(4, SliceRange::from(2..2)), 2), Some(2));
        assert_eq!(required_len(&cols(4, SliceRange::from(3..3)), 2), None);
    }
}
