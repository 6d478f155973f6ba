//! Table: a row-oriented, possibly jagged, two-dimensional container.
//!
//! A [`Table`] owns a list of [`Sequence`] rows sharing one
//! [`TypeConstraint`] and one [`RowType`]. Rows may differ in length; the
//! column axis is then *jagged* and column keys whose meaning depends on a
//! single row length are rejected (see [`slicer`](crate::slicer)).
//!
//! Row lengths and their extremes are cached and recomputed lazily after
//! any structural change. Row labels live in an optional
//! [`LabelRegistry`] that is created on first access and kept the same
//! length as the row list by every row-count change.
//!
//! Indexing forms:
//! - single rows: [`get`](Table::get), [`row`](Table::row), [`set`](Table::set)
//! - row ranges: [`slice`](Table::slice), [`set_slice`](Table::set_slice), [`delete`](Table::delete)
//! - cells: [`cell`](Table::cell), [`set_cell`](Table::set_cell)
//! - rectangles: [`rect`](Table::rect), [`set_rect`](Table::set_rect), [`delete_rect`](Table::delete_rect)

mod cells;
mod row_type;
mod rows;
mod search;

use std::fmt;

use itertools::Itertools;
use once_cell::sync::OnceCell;

use crate::cache::{Cached, InvalidateCache};
use crate::debug_invariants::DebugInvariants;
use crate::labels::LabelRegistry;
use crate::sequence::Sequence;
use crate::slicer::{Extent, SliceRange, Slicer};
use crate::table_error::TableError;
use crate::value::{TypeConstraint, Value};

pub use cells::RectSelection;
pub use row_type::{RowCheck, RowType};
pub use search::CellRange;

/// Per-row lengths and their extremes; `None` extremes for a table with no rows.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RowStats {
    lengths: Vec<usize>,
    min: Option<usize>,
    max: Option<usize>,
}

impl RowStats {
    fn compute(rows: &[Sequence]) -> Self {
        let lengths: Vec<usize> = rows.iter().map(Sequence::len).collect();
        let (min, max) = match lengths.iter().copied().minmax() {
            itertools::MinMaxResult::NoElements => (None, None),
            itertools::MinMaxResult::OneElement(n) => (Some(n), Some(n)),
            itertools::MinMaxResult::MinMax(lo, hi) => (Some(lo), Some(hi)),
        };
        Self { lengths, min, max }
    }
}

/// Two-dimensional, type-constrained, jagged-capable container.
///
/// # Invariants
///
/// - Every row carries the table's constraint.
/// - A label registry, once present, has exactly one slot per row.
/// - A fresh row-length cache matches the current rows.
#[derive(Clone, Debug)]
pub struct Table {
    constraint: TypeConstraint,
    row_type: RowType,
    rows: Vec<Sequence>,
    labels: OnceCell<LabelRegistry>,
    stats: Cached<RowStats>,
}

/// Builder for [`Table`] with an optional constraint, row type and labels.
#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    constraint: Option<TypeConstraint>,
    row_type: RowType,
    labels: Option<LabelRegistry>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn constraint(mut self, constraint: TypeConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }
    pub fn row_type(mut self, row_type: RowType) -> Self {
        self.row_type = row_type;
        self
    }
    pub fn labels(mut self, labels: LabelRegistry) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Validate `rows` and assemble the table.
    ///
    /// # Errors
    /// `TypeMismatch` or `InvalidRow` for a rejected row; `SizeMismatch`
    /// when the labels do not cover every row.
    pub fn build<R, I, V>(self, rows: R) -> Result<Table, TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut table = Table::from_parts(
            self.constraint.unwrap_or_default(),
            self.row_type,
            Vec::new(),
            None,
        );
        table.rows = table.make_rows(rows)?;
        if let Some(labels) = self.labels {
            table.set_labels(labels)?;
        }
        Ok(table)
    }
}

impl Table {
    /// Table under the standard constraint with plain sequence rows.
    ///
    /// # Example
    /// ```rust
    /// # fn try_main() -> Result<(), jagged_table::table_error::TableError> {
    /// use jagged_table::prelude::*;
    /// let table = Table::new([values![1, 2, 3], values![4], values![5, 6]])?;
    /// assert_eq!(table.row_lengths(), &[3, 1, 2]);
    /// assert!(table.is_jagged());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<R, I, V>(rows: R) -> Result<Self, TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        TableBuilder::new().build(rows)
    }

    pub fn with_constraint<R, I, V>(rows: R, constraint: TypeConstraint) -> Result<Self, TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        TableBuilder::new().constraint(constraint).build(rows)
    }

    /// A table with no rows.
    pub fn empty(constraint: TypeConstraint) -> Self {
        Self::from_parts(constraint, RowType::SEQUENCE, Vec::new(), None)
    }

    /// Assemble from rows already validated against `constraint`.
    pub(crate) fn from_parts(
        constraint: TypeConstraint,
        row_type: RowType,
        rows: Vec<Sequence>,
        labels: Option<LabelRegistry>,
    ) -> Self {
        Self {
            constraint,
            row_type,
            rows,
            labels: labels.map_or_else(OnceCell::new, OnceCell::with_value),
            stats: Cached::stale(),
        }
    }

    /// Same constraint and row type, different rows.
    pub(crate) fn like<R, I, V>(&self, rows: R) -> Result<Self, TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let rows = self.make_rows(rows)?;
        Ok(Self::from_parts(self.constraint, self.row_type, rows, None))
    }

    #[inline]
    pub fn constraint(&self) -> TypeConstraint {
        self.constraint
    }

    #[inline]
    pub fn row_type(&self) -> RowType {
        self.row_type
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in order; each call starts afresh.
    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.rows.iter()
    }

    // ---------------------------------------------------------------------
    // Row-length cache
    // ---------------------------------------------------------------------

    fn stats(&self) -> &RowStats {
        self.stats.get_or_compute(|| {
            log::trace!("recomputing row lengths for {} rows", self.rows.len());
            RowStats::compute(&self.rows)
        })
    }

    /// Length of every row, in order.
    pub fn row_lengths(&self) -> &[usize] {
        &self.stats().lengths
    }

    /// Shortest row length, or `None` without rows.
    pub fn min_row_length(&self) -> Option<usize> {
        self.stats().min
    }

    /// Longest row length, or `None` without rows.
    pub fn max_row_length(&self) -> Option<usize> {
        self.stats().max
    }

    /// Whether rows differ in length.
    pub fn is_jagged(&self) -> bool {
        let stats = self.stats();
        stats.min != stats.max
    }

    /// Whether the next statistics read will recompute.
    pub fn row_lengths_stale(&self) -> bool {
        self.stats.is_stale()
    }

    /// The column axis as seen by column keys.
    pub(crate) fn column_extent(&self) -> Extent {
        let stats = self.stats();
        Extent::columns(stats.min, stats.max)
    }

    fn structure_changed(&mut self) {
        self.invalidate_cache();
        crate::table_debug_assert_ok!(self.validate_invariants(), "Table mutation");
    }

    // ---------------------------------------------------------------------
    // Row construction
    // ---------------------------------------------------------------------

    /// Validate `values` as a row of this table.
    pub(crate) fn make_row<I, V>(&self, values: I) -> Result<Sequence, TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let row = Sequence::with_constraint(values, self.constraint)?;
        self.row_type.validate(row.as_slice())?;
        Ok(row)
    }

    pub(crate) fn make_rows<R, I, V>(&self, rows: R) -> Result<Vec<Sequence>, TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        rows.into_iter().map(|row| self.make_row(row)).collect()
    }

    fn verify_combinable(&self, other: &Table) -> Result<(), TableError> {
        if self.constraint != other.constraint {
            return Err(TableError::IncompatibleTypes(format!(
                "constraint {} differs from {}",
                self.constraint, other.constraint
            )));
        }
        if self.row_type != other.row_type {
            return Err(TableError::IncompatibleTypes(format!(
                "row type `{}` differs from `{}`",
                self.row_type.name(),
                other.row_type.name()
            )));
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Labels
    // ---------------------------------------------------------------------

    fn unset_labels(&self) -> LabelRegistry {
        log::debug!("creating {} unset row labels", self.rows.len());
        LabelRegistry::with_len(self.rows.len())
    }

    /// Row labels, created all-unset on first access.
    ///
    /// Labels are edited through the table so the registry always has one
    /// slot per row.
    pub fn labels(&self) -> &LabelRegistry {
        self.labels.get_or_init(|| self.unset_labels())
    }

    /// Apply a length-preserving edit to the registry, creating it if needed.
    fn edit_labels(
        &mut self,
        edit: impl FnOnce(&mut LabelRegistry) -> Result<(), TableError>,
    ) -> Result<(), TableError> {
        let mut labels = match self.labels.take() {
            Some(labels) => labels,
            None => self.unset_labels(),
        };
        let outcome = edit(&mut labels);
        self.labels = OnceCell::with_value(labels);
        crate::table_debug_assert_ok!(self.validate_invariants(), "Table label edit");
        outcome
    }

    /// Bind `label` to row `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange`, `EmptyLabelRejected`, or `DuplicateLabel` when
    /// another row already carries `label`.
    pub fn set_label(&mut self, index: isize, label: impl Into<String>) -> Result<(), TableError> {
        let label = label.into();
        self.edit_labels(|labels| labels.set(index, label))
    }

    /// Unset the label of row `index`.
    pub fn clear_label(&mut self, index: isize) -> Result<(), TableError> {
        self.edit_labels(|labels| labels.clear(index))
    }

    /// Unset `label` wherever it is bound.
    ///
    /// # Errors
    /// `LabelNotFound` if no row carries `label`.
    pub fn remove_label(&mut self, label: &str) -> Result<(), TableError> {
        self.edit_labels(|labels| labels.clear_label(label))
    }

    /// Relabel the rows visited by `range`; `""` unsets a label.
    ///
    /// # Errors
    /// `SizeMismatch` unless there is exactly one label per visited row;
    /// `DuplicateLabel` or a normalization error. Nothing changes on error.
    pub fn set_label_slice<I, S>(&mut self, range: impl Into<SliceRange>, labels: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let range = range.into();
        self.edit_labels(|registry| registry.set_slice(range, labels))
    }

    /// Whether a label registry has been created.
    pub fn has_labels(&self) -> bool {
        self.labels.get().is_some()
    }

    /// Replace the label registry.
    ///
    /// # Errors
    /// `SizeMismatch` unless `labels` has one slot per row.
    pub fn set_labels(&mut self, labels: LabelRegistry) -> Result<(), TableError> {
        if labels.len() != self.rows.len() {
            return Err(TableError::SizeMismatch {
                expected: self.rows.len(),
                found: labels.len(),
            });
        }
        self.labels = OnceCell::with_value(labels);
        Ok(())
    }

    /// Detach the label registry, if any.
    pub fn take_labels(&mut self) -> Option<LabelRegistry> {
        self.labels.take()
    }

    /// Row bound to `label`.
    ///
    /// # Errors
    /// `LabelNotFound` if no row carries `label`.
    pub fn row_by_label(&self, label: &str) -> Result<&Sequence, TableError> {
        let index = match self.labels.get() {
            Some(labels) => labels.index_of(label)?,
            None => return Err(TableError::LabelNotFound(label.to_owned())),
        };
        Ok(&self.rows[index])
    }

    /// Label at row `index` without creating a registry.
    fn label_slot(&self, index: usize) -> Option<&str> {
        self.labels
            .get()
            .and_then(|labels| labels.slots()[index].as_deref())
    }

    /// Label slots as owned values; all unset without a registry.
    pub(crate) fn label_slots(&self) -> Vec<Option<String>> {
        match self.labels.get() {
            Some(labels) => labels.slots().to_vec(),
            None => vec![None; self.rows.len()],
        }
    }

    /// Labels after replacing the rows visited by `slicer` with rows labelled `incoming`.
    ///
    /// `None` means the table stays without a registry.
    fn respliced_labels(
        &self,
        slicer: &Slicer,
        incoming: Vec<Option<String>>,
    ) -> Result<Option<LabelRegistry>, TableError> {
        if !self.has_labels() && incoming.iter().all(Option::is_none) {
            return Ok(None);
        }
        let mut slots = self.label_slots();
        slicer.assign(&mut slots, incoming)?;
        LabelRegistry::from_slots(slots).map(Some)
    }

    fn commit_labels(&mut self, labels: Option<LabelRegistry>) {
        if let Some(labels) = labels {
            self.labels = OnceCell::with_value(labels);
        }
    }

    // ---------------------------------------------------------------------
    // Export
    // ---------------------------------------------------------------------

    /// Plain nested-list export.
    pub fn to_vec(&self) -> Vec<Vec<Value>> {
        self.rows.iter().map(Sequence::to_vec).collect()
    }

    /// Every cell in row-major order.
    pub fn flatten(&self) -> Vec<Value> {
        self.rows.iter().flat_map(|row| row.iter().cloned()).collect()
    }
}

impl InvalidateCache for Table {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.stats.invalidate();
    }
}

impl DebugInvariants for Table {
    fn debug_assert_invariants(&self) {
        crate::table_debug_assert_ok!(self.validate_invariants(), "Table invalid");
    }

    fn validate_invariants(&self) -> Result<(), TableError> {
        for row in &self.rows {
            if row.constraint() != self.constraint {
                return Err(TableError::IncompatibleTypes(format!(
                    "row constraint {} differs from table constraint {}",
                    row.constraint(),
                    self.constraint
                )));
            }
            row.validate_invariants()?;
        }
        if let Some(labels) = self.labels.get() {
            if labels.len() != self.rows.len() {
                return Err(TableError::SizeMismatch {
                    expected: self.rows.len(),
                    found: labels.len(),
                });
            }
            labels.validate_invariants()?;
        }
        if let Some(stats) = self.stats.peek() {
            let fresh = RowStats::compute(&self.rows);
            if *stats != fresh {
                return Err(TableError::SizeMismatch {
                    expected: fresh.lengths.len(),
                    found: stats.lengths.len(),
                });
            }
        }
        Ok(())
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.constraint == other.constraint
            && self.row_type == other.row_type
            && self.rows == other.rows
            && (0..self.rows.len()).all(|i| self.label_slot(i) == other.label_slot(i))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return f.write_str("Table()");
        }
        write!(f, "Table(\n  {}\n)", self.rows.iter().join(",\n  "))
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}


#[cfg(test)]
mod tests;
