//! Value search over a sequence or a `[start, stop)` sub-range of it.

use std::ops::Range;

use super::Sequence;
use crate::slicer::SliceRange;
use crate::table_error::TableError;
use crate::value::Value;

/// Normalize a search window over `len` positions.
///
/// `start` must land in `[0, len)` and `stop` in `[0, len]` after negative
/// offsets are applied; a window with `start >= stop` is `RangeIsEmpty`.
/// Only step 1 windows are meaningful for searching.
pub(crate) fn search_window(len: usize, window: &SliceRange) -> Result<Range<usize>, TableError> {
    if matches!(window.step, Some(step) if step != 1) {
        return Err(TableError::InvalidStep);
    }
    let signed = isize::try_from(len).unwrap_or(isize::MAX);
    let out_of_range = |index| TableError::IndexOutOfRange { index, len };

    let start = match window.start {
        Some(start) if start < -signed || start >= signed => return Err(out_of_range(start)),
        Some(start) if start < 0 => start + signed,
        Some(start) => start,
        None => 0,
    };
    let stop = match window.stop {
        Some(stop) if stop < -signed || stop > signed => return Err(out_of_range(stop)),
        Some(stop) if stop < 0 => stop + signed,
        Some(stop) => stop,
        None => signed,
    };
    if start >= stop {
        return Err(TableError::RangeIsEmpty);
    }
    Ok(start.unsigned_abs()..stop.unsigned_abs())
}

impl Sequence {
    /// First position of `value`.
    ///
    /// # Errors
    /// `ValueNotFound` on a miss; `RangeIsEmpty` on an empty sequence.
    pub fn find(&self, value: &Value) -> Result<usize, TableError> {
        self.find_in(value, SliceRange::FULL)
    }

    /// First position of `value` inside `window`.
    pub fn find_in(&self, value: &Value, window: impl Into<SliceRange>) -> Result<usize, TableError> {
        search_window(self.len(), &window.into())?
            .find(|&i| &self.items[i] == value)
            .ok_or(TableError::ValueNotFound)
    }

    /// Last position of `value`.
    pub fn rfind(&self, value: &Value) -> Result<usize, TableError> {
        self.rfind_in(value, SliceRange::FULL)
    }

    /// Last position of `value` inside `window`.
    pub fn rfind_in(&self, value: &Value, window: impl Into<SliceRange>) -> Result<usize, TableError> {
        search_window(self.len(), &window.into())?
            .rev()
            .find(|&i| &self.items[i] == value)
            .ok_or(TableError::ValueNotFound)
    }

    /// Number of occurrences of `value`.
    pub fn count(&self, value: &Value) -> Result<usize, TableError> {
        self.count_in(value, SliceRange::FULL)
    }

    pub fn count_in(&self, value: &Value, window: impl Into<SliceRange>) -> Result<usize, TableError> {
        let range = search_window(self.len(), &window.into())?;
        Ok(self.items[range].iter().filter(|v| *v == value).count())
    }

    /// Every position of `value`, ascending.
    pub fn find_all(&self, value: &Value) -> Result<Vec<usize>, TableError> {
        self.find_all_in(value, SliceRange::FULL)
    }

    pub fn find_all_in(
        &self,
        value: &Value,
        window: impl Into<SliceRange>,
    ) -> Result<Vec<usize>, TableError> {
        let range = search_window(self.len(), &window.into())?;
        Ok(range.filter(|&i| &self.items[i] == value).collect())
    }
}
