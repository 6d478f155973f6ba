//! Sequence: an ordered, type-constrained list of values.
//!
//! Every element of a [`Sequence`] is admitted by its [`TypeConstraint`].
//! Mutations validate keys and values completely before touching the
//! elements, so a failed call leaves the sequence unchanged.

pub(crate) mod search;

use std::fmt;

use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::slicer::{Key, SliceRange, Slicer};
use crate::table_error::TableError;
use crate::value::{TypeConstraint, Value};

/// Result of [`Sequence::select`].
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Element(Value),
    Sequence(Sequence),
}

/// Ordered, type-constrained container.
///
/// # Invariants
///
/// - Every element is accepted by `constraint`.
/// - `constraint` never changes after construction.
#[derive(Clone, Debug)]
pub struct Sequence {
    constraint: TypeConstraint,
    items: Vec<Value>,
}

impl Sequence {
    /// Build a sequence under the standard constraint.
    ///
    /// # Errors
    /// See [`with_constraint`](Self::with_constraint).
    pub fn new<I, V>(values: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::with_constraint(values, TypeConstraint::standard())
    }

    /// Build a sequence whose elements must satisfy `constraint`.
    ///
    /// # Errors
    /// Returns `Err(TypeMismatch)` for the first rejected value.
    ///
    /// # Example
    /// ```rust
    /// # fn try_main() -> Result<(), jagged_table::table_error::TableError> {
    /// use jagged_table::prelude::*;
    /// let tc = TypeConstraint::parse(["int", "str"])?;
    /// let seq = Sequence::with_constraint(values![1, "a", ()], tc)?;
    /// assert_eq!(seq.len(), 3);
    /// assert!(Sequence::with_constraint(values![3.5], tc).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_constraint<I, V>(values: I, constraint: TypeConstraint) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = collect_checked(values, constraint)?;
        Ok(Self { constraint, items })
    }

    /// An empty sequence.
    pub fn empty(constraint: TypeConstraint) -> Self {
        Self {
            constraint,
            items: Vec::new(),
        }
    }

    /// Wrap values already validated against `constraint`.
    pub(crate) fn from_checked(constraint: TypeConstraint, items: Vec<Value>) -> Self {
        debug_assert!(items.iter().all(|v| constraint.accepts(v)));
        Self { constraint, items }
    }

    #[inline]
    pub fn constraint(&self) -> TypeConstraint {
        self.constraint
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    /// Raw element access for containers that validate on their own.
    pub(crate) fn items_mut(&mut self) -> &mut Vec<Value> {
        &mut self.items
    }

    /// Forward traversal; each call starts afresh.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    /// Backward traversal; each call starts afresh.
    pub fn iter_rev(&self) -> std::iter::Rev<std::slice::Iter<'_, Value>> {
        self.items.iter().rev()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    /// Plain-list export.
    pub fn to_vec(&self) -> Vec<Value> {
        self.items.clone()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }

    // ---------------------------------------------------------------------
    // Indexing
    // ---------------------------------------------------------------------

    /// Element at `index`; negative indices count from the end.
    ///
    /// # Errors
    /// `IndexOutOfRange` outside `[-len, len)`.
    pub fn get(&self, index: isize) -> Result<&Value, TableError> {
        let slicer = Slicer::new(self.len(), index)?;
        Ok(&self.items[slicer.forward()[0]])
    }

    /// Independent copy of the elements visited by `range`.
    ///
    /// # Errors
    /// `IndexOutOfRange`, `InvalidStep` or `EmptyExtendedRange`.
    pub fn slice(&self, range: impl Into<SliceRange>) -> Result<Sequence, TableError> {
        let slicer = Slicer::new(self.len(), range.into())?;
        Ok(Self::from_checked(self.constraint, slicer.gather(&self.items)))
    }

    /// Element or sub-sequence, depending on the key shape.
    pub fn select(&self, key: impl Into<Key>) -> Result<Selection, TableError> {
        match key.into() {
            Key::Index(index) => self.get(index).cloned().map(Selection::Element),
            Key::Range(range) => self.slice(range).map(Selection::Sequence),
        }
    }

    /// Replace the element at `index`.
    ///
    /// # Errors
    /// `IndexOutOfRange` or `TypeMismatch`; nothing changes on error.
    pub fn set(&mut self, index: isize, value: impl Into<Value>) -> Result<(), TableError> {
        let slicer = Slicer::new(self.len(), index)?;
        let value = value.into();
        self.constraint.check(&value)?;
        self.items[slicer.forward()[0]] = value;
        crate::table_debug_assert_ok!(self.validate_invariants(), "Sequence::set");
        Ok(())
    }

    /// Replace the elements visited by `range` with `values`.
    ///
    /// Step 1 ranges may grow or shrink the sequence; any other step needs
    /// exactly as many values as the range visits.
    ///
    /// # Errors
    /// `TypeMismatch`, `SizeMismatch`, or a normalization error; nothing
    /// changes on error.
    pub fn set_slice<I, V>(&mut self, range: impl Into<SliceRange>, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let slicer = Slicer::new(self.len(), range.into())?;
        let values = collect_checked(values, self.constraint)?;
        slicer.assign(&mut self.items, values)?;
        crate::table_debug_assert_ok!(self.validate_invariants(), "Sequence::set_slice");
        Ok(())
    }

    /// Insert `value` before position `index` (`len` appends).
    pub fn insert(&mut self, index: isize, value: impl Into<Value>) -> Result<(), TableError> {
        self.set_slice(SliceRange::at(index), [value.into()])
    }

    pub fn append(&mut self, value: impl Into<Value>) -> Result<(), TableError> {
        self.set_slice(SliceRange::at(self.end()), [value.into()])
    }

    pub fn extend<I, V>(&mut self, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.set_slice(SliceRange::at(self.end()), values)
    }

    /// Remove the element or range addressed by `key`.
    pub fn delete(&mut self, key: impl Into<Key>) -> Result<(), TableError> {
        let slicer = Slicer::new(self.len(), key)?;
        slicer.remove(&mut self.items);
        Ok(())
    }

    /// Remove and return the last element.
    ///
    /// # Errors
    /// `IndexOutOfRange` when empty.
    pub fn pop(&mut self) -> Result<Value, TableError> {
        self.items
            .pop()
            .ok_or(TableError::IndexOutOfRange { index: -1, len: 0 })
    }

    pub fn reverse(&mut self) {
        self.items.reverse();
    }

    // ---------------------------------------------------------------------
    // Concatenation
    // ---------------------------------------------------------------------

    /// `self` followed by `other`, as a new sequence.
    ///
    /// # Errors
    /// `IncompatibleTypes` unless both constraints are equal.
    pub fn concat(&self, other: &Sequence) -> Result<Sequence, TableError> {
        self.verify_combinable(other)?;
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Ok(Self::from_checked(self.constraint, items))
    }

    /// `self` followed by plain `values`, coerced through this constraint.
    pub fn concat_values<I, V>(&self, values: I) -> Result<Sequence, TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let tail = Self::with_constraint(values, self.constraint)?;
        self.concat(&tail)
    }

    /// Plain `values` followed by `self`.
    pub fn prepend_values<I, V>(&self, values: I) -> Result<Sequence, TableError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::with_constraint(values, self.constraint)?.concat(self)
    }

    /// Append every element of `other` in place.
    pub fn extend_from(&mut self, other: &Sequence) -> Result<(), TableError> {
        self.verify_combinable(other)?;
        self.items.extend_from_slice(&other.items);
        Ok(())
    }

    fn verify_combinable(&self, other: &Sequence) -> Result<(), TableError> {
        if self.constraint != other.constraint {
            return Err(TableError::IncompatibleTypes(format!(
                "constraint {} differs from {}",
                self.constraint, other.constraint
            )));
        }
        Ok(())
    }

    #[inline]
    fn end(&self) -> isize {
        isize::try_from(self.len()).unwrap_or(isize::MAX)
    }
}

/// Convert and validate `values` without committing anything.
pub(crate) fn collect_checked<I, V>(values: I, constraint: TypeConstraint) -> Result<Vec<Value>, TableError>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    values
        .into_iter()
        .map(|v| {
            let v = v.into();
            constraint.check(&v).map(|()| v)
        })
        .collect()
}

impl DebugInvariants for Sequence {
    fn debug_assert_invariants(&self) {
        crate::table_debug_assert_ok!(self.validate_invariants(), "Sequence invalid");
    }

    fn validate_invariants(&self) -> Result<(), TableError> {
        self.constraint.check_all(&self.items)
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.constraint == other.constraint && self.items == other.items
    }
}

impl PartialEq<[Value]> for Sequence {
    fn eq(&self, other: &[Value]) -> bool {
        self.items == other
    }
}

impl PartialEq<Vec<Value>> for Sequence {
    fn eq(&self, other: &Vec<Value>) -> bool {
        &self.items == other
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence({})", self.items.iter().join(", "))
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Sequence {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests;
