//! Whole-row operations: access, replacement, range splicing, concatenation.

use super::Table;
use crate::labels::LabelRegistry;
use crate::sequence::Sequence;
use crate::slicer::{Key, SliceRange, Slicer};
use crate::table_error::TableError;
use crate::value::Value;

impl Table {
    /// Independent copy of row `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` outside `[-len, len)`.
    pub fn get(&self, index: isize) -> Result<Sequence, TableError> {
        self.row(index).cloned()
    }

    /// Borrow row `index`.
    pub fn row(&self, index: isize) -> Result<&Sequence, TableError> {
        let slicer = Slicer::new(self.len(), index)?;
        Ok(&self.rows[slicer.forward()[0]])
    }

    /// Replace row `index` with a new row built from `values`.
    ///
    /// The row keeps its label.
    ///
    /// # Errors
    /// `IndexOutOfRange`, `TypeMismatch` or `InvalidRow`; nothing changes on
    /// error.
    pub fn set<I, V>(&mut self, index: isize, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let slicer = Slicer::new(self.len(), index)?;
        let row = self.make_row(values)?;
        self.rows[slicer.forward()[0]] = row;
        self.structure_changed();
        Ok(())
    }

    /// Rows visited by `range`, as a new table carrying their labels.
    pub fn slice(&self, range: impl Into<SliceRange>) -> Result<Table, TableError> {
        let slicer = Slicer::new(self.len(), range.into())?;
        let labels = match self.labels.get() {
            Some(labels) => Some(LabelRegistry::from_slots(slicer.gather(labels.slots()))?),
            None => None,
        };
        Ok(Table::from_parts(
            self.constraint,
            self.row_type,
            slicer.gather(&self.rows),
            labels,
        ))
    }

    /// Replace the rows visited by `range` with new rows built from `rows`.
    ///
    /// Step 1 ranges may change the row count; other steps need exactly as
    /// many rows as the range visits. New rows carry unset labels.
    ///
    /// # Errors
    /// `SizeMismatch`, `TypeMismatch`, `InvalidRow`, or a normalization
    /// error; nothing changes on error.
    pub fn set_slice<R, I, V>(&mut self, range: impl Into<SliceRange>, rows: R) -> Result<(), TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let slicer = Slicer::new(self.len(), range.into())?;
        let rows = self.make_rows(rows)?;
        let labels = vec![None; rows.len()];
        self.splice_rows(&slicer, rows, labels)
    }

    /// Replace the rows visited by `range` with copies of `other`'s rows and labels.
    ///
    /// # Errors
    /// `IncompatibleTypes` unless constraint and row type match;
    /// `DuplicateLabel` if the carried labels collide with kept ones.
    pub fn set_slice_table(&mut self, range: impl Into<SliceRange>, other: &Table) -> Result<(), TableError> {
        self.verify_combinable(other)?;
        let slicer = Slicer::new(self.len(), range.into())?;
        self.splice_rows(&slicer, other.rows.clone(), other.label_slots())
    }

    fn splice_rows(
        &mut self,
        slicer: &Slicer,
        rows: Vec<Sequence>,
        labels: Vec<Option<String>>,
    ) -> Result<(), TableError> {
        slicer.check_assign_len(rows.len())?;
        let labels = self.respliced_labels(slicer, labels)?;
        slicer.assign(&mut self.rows, rows)?;
        self.commit_labels(labels);
        self.structure_changed();
        Ok(())
    }

    /// Insert a row before position `index` (`len` appends).
    pub fn insert<I, V>(&mut self, index: isize, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.set_slice(SliceRange::at(index), [values])
    }

    pub fn append<I, V>(&mut self, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.set_slice(SliceRange::at(self.end()), [values])
    }

    pub fn extend<R, I, V>(&mut self, rows: R) -> Result<(), TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.set_slice(SliceRange::at(self.end()), rows)
    }

    /// Append copies of `other`'s rows and labels.
    pub fn extend_table(&mut self, other: &Table) -> Result<(), TableError> {
        self.set_slice_table(SliceRange::at(self.end()), other)
    }

    /// Remove the row or rows addressed by `key`, with their labels.
    pub fn delete(&mut self, key: impl Into<Key>) -> Result<(), TableError> {
        let slicer = Slicer::new(self.len(), key)?;
        if let Some(labels) = self.labels.get() {
            let mut slots = labels.slots().to_vec();
            slicer.remove(&mut slots);
            let labels = LabelRegistry::from_slots(slots)?;
            self.commit_labels(Some(labels));
        }
        slicer.remove(&mut self.rows);
        self.structure_changed();
        Ok(())
    }

    /// Remove and return the last row.
    ///
    /// # Errors
    /// `IndexOutOfRange` when there are no rows.
    pub fn pop(&mut self) -> Result<Sequence, TableError> {
        let row = self.get(-1)?;
        self.delete(-1)?;
        Ok(row)
    }

    /// Reverse the row order; labels follow their rows.
    pub fn reverse(&mut self) {
        self.rows.reverse();
        if let Some(labels) = self.labels.get_mut() {
            labels.reverse();
        }
        self.structure_changed();
    }

    /// `self` followed by `other`, as a new table; labels are carried.
    ///
    /// # Errors
    /// `IncompatibleTypes` unless constraint and row type match;
    /// `DuplicateLabel` if both tables use the same label.
    pub fn concat(&self, other: &Table) -> Result<Table, TableError> {
        self.verify_combinable(other)?;
        let mut joined = self.clone();
        joined.extend_table(other)?;
        Ok(joined)
    }

    /// `self` followed by new rows built from `rows`.
    pub fn concat_rows<R, I, V>(&self, rows: R) -> Result<Table, TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.concat(&self.like(rows)?)
    }

    /// New rows built from `rows` followed by `self`.
    pub fn prepend_rows<R, I, V>(&self, rows: R) -> Result<Table, TableError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.like(rows)?.concat(self)
    }

    /// Whether any cell equals `value`.
    pub fn contains(&self, value: &Value) -> bool {
        self.rows.iter().any(|row| row.contains(value))
    }

    /// Whether any row has exactly the elements of `row`.
    pub fn contains_row(&self, row: &[Value]) -> bool {
        self.rows.iter().any(|r| r.as_slice() == row)
    }

    #[inline]
    fn end(&self) -> isize {
        isize::try_from(self.len()).unwrap_or(isize::MAX)
    }
}
