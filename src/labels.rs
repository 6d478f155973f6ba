//! LabelRegistry: fixed-length row labels with reverse lookup.
//!
//! Each slot is either unset or holds a non-empty label unique within the
//! registry. The registry never grows or shrinks through its public API;
//! only the owning [`Table`](crate::table::Table) changes its length, in
//! lockstep with its rows.

use std::fmt;

use hashbrown::HashMap;
use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::slicer::{SliceRange, Slicer};
use crate::table_error::TableError;

/// Ordered label slots plus a label → index map.
///
/// # Invariants
///
/// - `index` maps exactly the set labels to their slot positions.
/// - No label is bound to two slots and no slot holds `""`.
#[derive(Clone, Debug, Default)]
pub struct LabelRegistry {
    slots: Vec<Option<String>>,
    index: HashMap<String, usize>,
}

impl LabelRegistry {
    /// A registry of `len` unset slots.
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            index: HashMap::new(),
        }
    }

    /// Build a registry from `labels`, where `""` leaves a slot unset.
    ///
    /// # Errors
    /// Returns `Err(DuplicateLabel)` if a label repeats.
    ///
    /// # Example
    /// ```rust
    /// # fn try_main() -> Result<(), jagged_table::table_error::TableError> {
    /// use jagged_table::labels::LabelRegistry;
    /// let labels = LabelRegistry::new(["x", "", "z"])?;
    /// assert_eq!(labels.index_of("z")?, 2);
    /// assert_eq!(labels.get(1)?, None);
    /// assert!(LabelRegistry::new(["x", "x"]).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<I, S>(labels: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_slots(labels.into_iter().map(|s| non_empty(s.into())).collect())
    }

    /// Rebuild the reverse map over `slots`.
    pub(crate) fn from_slots(slots: Vec<Option<String>>) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(slots.len());
        for (i, slot) in slots.iter().enumerate() {
            let Some(label) = slot else { continue };
            if label.is_empty() {
                return Err(TableError::EmptyLabelRejected);
            }
            if let Some(&first) = index.get(label.as_str()) {
                return Err(TableError::DuplicateLabel {
                    label: label.clone(),
                    index: first,
                });
            }
            index.insert(label.clone(), i);
        }
        Ok(Self { slots, index })
    }

    pub(crate) fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Label at `index`, or `None` when unset.
    ///
    /// # Errors
    /// `IndexOutOfRange` outside `[-len, len)`.
    pub fn get(&self, index: isize) -> Result<Option<&str>, TableError> {
        let at = self.position(index)?;
        Ok(self.slots[at].as_deref())
    }

    /// Index bound to `label`.
    ///
    /// # Errors
    /// `LabelNotFound` if no slot holds `label`.
    pub fn index_of(&self, label: &str) -> Result<usize, TableError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| TableError::LabelNotFound(label.to_owned()))
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Bind `label` to `index`, replacing whatever the slot held.
    ///
    /// # Errors
    /// `IndexOutOfRange`, `EmptyLabelRejected` for `""`, or `DuplicateLabel`
    /// when `label` is bound to a different index.
    pub fn set(&mut self, index: isize, label: impl Into<String>) -> Result<(), TableError> {
        let at = self.position(index)?;
        let label = label.into();
        if label.is_empty() {
            return Err(TableError::EmptyLabelRejected);
        }
        if let Some(&bound) = self.index.get(label.as_str()) {
            if bound != at {
                return Err(TableError::DuplicateLabel { label, index: bound });
            }
            return Ok(());
        }
        if let Some(old) = self.slots[at].take() {
            self.index.remove(&old);
        }
        self.index.insert(label.clone(), at);
        self.slots[at] = Some(label);
        crate::table_debug_assert_ok!(self.validate_invariants(), "LabelRegistry::set");
        Ok(())
    }

    /// Unset the slot at `index`; clearing an unset slot is a no-op.
    pub fn clear(&mut self, index: isize) -> Result<(), TableError> {
        let at = self.position(index)?;
        if let Some(old) = self.slots[at].take() {
            self.index.remove(&old);
        }
        Ok(())
    }

    /// Unset the slot holding `label`.
    ///
    /// # Errors
    /// `LabelNotFound` if no slot holds `label`.
    pub fn clear_label(&mut self, label: &str) -> Result<(), TableError> {
        let at = self
            .index
            .remove(label)
            .ok_or_else(|| TableError::LabelNotFound(label.to_owned()))?;
        self.slots[at] = None;
        Ok(())
    }

    /// Labels visited by `range`, as a new registry.
    pub fn slice(&self, range: impl Into<SliceRange>) -> Result<LabelRegistry, TableError> {
        let slicer = Slicer::new(self.len(), range.into())?;
        Self::from_slots(slicer.gather(&self.slots))
    }

    /// Relabel every slot visited by `range`; `""` unsets a slot.
    ///
    /// The registry cannot be resized, so exactly one label per visited slot
    /// is required. Uniqueness is checked against the final state, which
    /// lets a call swap two labels.
    ///
    /// # Errors
    /// `SizeMismatch`, `DuplicateLabel`, or a normalization error; nothing
    /// changes on error.
    pub fn set_slice<I, S>(&mut self, range: impl Into<SliceRange>, labels: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slicer = Slicer::new(self.len(), range.into())?;
        let labels: Vec<Option<String>> = labels.into_iter().map(|s| non_empty(s.into())).collect();
        if labels.len() != slicer.size() {
            return Err(TableError::SizeMismatch {
                expected: slicer.size(),
                found: labels.len(),
            });
        }
        let mut slots = self.slots.clone();
        for (&i, label) in slicer.forward().iter().zip(labels) {
            slots[i] = label;
        }
        *self = Self::from_slots(slots)?;
        Ok(())
    }

    /// Reverse the slot order, keeping each label unique.
    pub(crate) fn reverse(&mut self) {
        self.slots.reverse();
        let last = self.slots.len().saturating_sub(1);
        for at in self.index.values_mut() {
            *at = last - *at;
        }
    }

    /// Slots in order; `None` for unset.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Option<&str>> + '_ {
        self.slots.iter().map(Option::as_deref)
    }

    /// Plain-list export, with `""` for unset slots.
    pub fn to_vec(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| slot.clone().unwrap_or_default())
            .collect()
    }

    fn position(&self, index: isize) -> Result<usize, TableError> {
        Ok(Slicer::new(self.len(), index)?.forward()[0])
    }
}

#[inline]
fn non_empty(label: String) -> Option<String> {
    (!label.is_empty()).then_some(label)
}

impl PartialEq for LabelRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for LabelRegistry {}

impl DebugInvariants for LabelRegistry {
    fn debug_assert_invariants(&self) {
        crate::table_debug_assert_ok!(self.validate_invariants(), "LabelRegistry invalid");
    }

    fn validate_invariants(&self) -> Result<(), TableError> {
        let set = self.slots.iter().flatten().count();
        if set != self.index.len() {
            return Err(TableError::SizeMismatch {
                expected: set,
                found: self.index.len(),
            });
        }
        for (label, &i) in &self.index {
            if self.slots.get(i).and_then(Option::as_deref) != Some(label.as_str()) {
                return Err(TableError::LabelNotFound(label.clone()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for LabelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self
            .iter()
            .map(|slot| format!("{:?}", slot.unwrap_or("")))
            .join(", ");
        write!(f, "LabelRegistry({body})")
    }
}
