//! Slicer: index and slice normalization.
//!
//! A [`Slicer`] turns a [`Key`] into a canonical, forward-iterable range over
//! a container of known [`Extent`], together with the statistics needed to
//! validate assignments and to walk the range in either order:
//!
//! - `size`: number of visited positions,
//! - `last`: final visited position,
//! - `min`/`max`: smallest and largest of `start` and `last`,
//! - `span`: `max - min + 1`.
//!
//! Normalization rules:
//! - a negative index or bound counts from the end (`index + len`);
//! - a single index must land in `[0, len)`;
//! - an explicit start must land in `[0, len]` for ascending steps and in
//!   `[0, len)` for descending ones; an explicit stop must land in `[0, len]`;
//! - a zero step is rejected; omitted bounds default by step sign
//!   (ascending `0..len`, descending `len-1` down to the `-1` sentinel);
//! - with step 1 an inverted range collapses to `stop = start`; any other
//!   step with an explicit bound must visit at least one position.
//!
//! On a jagged column axis (`Extent::jagged`) the length is ambiguous, so
//! negative indices and bounds, a default descending start and a default
//! ascending stop are all rejected.
//!
//! Slicers are short-lived: they are built per call and the visit orders
//! they memoize never outlive that call.

pub mod key;
pub mod table_slicer;

use once_cell::unsync::OnceCell;

use crate::table_error::TableError;

pub use key::{Key, SliceRange};
pub use table_slicer::TableSlicer;

/// Length of one axis, and whether that length is ambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extent {
    len: usize,
    jagged: bool,
}

impl Extent {
    /// An axis of exactly `len` positions.
    pub const fn uniform(len: usize) -> Self {
        Self { len, jagged: false }
    }

    /// The column axis of a table whose rows range from `min` to `max` in length.
    ///
    /// `None` for both means a table with no rows.
    pub fn columns(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            len: max.unwrap_or(0),
            jagged: min != max,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_jagged(&self) -> bool {
        self.jagged
    }

    #[inline]
    fn signed_len(&self) -> isize {
        isize::try_from(self.len).unwrap_or(isize::MAX)
    }

    fn out_of_range(&self, index: isize) -> TableError {
        TableError::IndexOutOfRange {
            index,
            len: self.len,
        }
    }

    /// Normalize a single index into `[0, len)`.
    ///
    /// # Errors
    /// `IndexOutOfRange` outside `[-len, len)`; `AmbiguousBoundInJaggedTable`
    /// for a negative index on a jagged axis.
    pub fn normalize_index(&self, index: isize) -> Result<usize, TableError> {
        let len = self.signed_len();
        if index < -len || index >= len {
            return Err(self.out_of_range(index));
        }
        let index = if index < 0 {
            if self.jagged {
                return Err(TableError::AmbiguousBoundInJaggedTable("index"));
            }
            index + len
        } else {
            index
        };
        Ok(index.unsigned_abs())
    }

    /// Normalize `range` into a canonical `(start, stop, step)` triple.
    ///
    /// # Errors
    /// `InvalidStep`, `IndexOutOfRange`, `EmptyExtendedRange` and
    /// `AmbiguousBoundInJaggedTable` as described in the module docs.
    pub fn normalize_range(&self, range: &SliceRange) -> Result<(isize, isize, isize), TableError> {
        let len = self.signed_len();

        let step = match range.step {
            None => 1,
            Some(0) => return Err(TableError::InvalidStep),
            Some(step) => step,
        };

        let start = match range.start {
            Some(start) => {
                let upper = if step > 0 { len } else { len - 1 };
                if start < -len || start > upper {
                    return Err(self.out_of_range(start));
                }
                if start < 0 {
                    if self.jagged {
                        return Err(TableError::AmbiguousBoundInJaggedTable("start index"));
                    }
                    start + len
                } else {
                    start
                }
            }
            None if step > 0 => 0,
            None if !self.jagged => len - 1,
            None => {
                return Err(TableError::AmbiguousBoundInJaggedTable(
                    "default start of a descending slice",
                ));
            }
        };

        let mut stop = match range.stop {
            Some(stop) => {
                if stop < -len || stop > len {
                    return Err(self.out_of_range(stop));
                }
                if stop < 0 {
                    if self.jagged {
                        return Err(TableError::AmbiguousBoundInJaggedTable("stop index"));
                    }
                    stop + len
                } else {
                    stop
                }
            }
            None if step < 0 => -1,
            None if !self.jagged => len,
            None => {
                return Err(TableError::AmbiguousBoundInJaggedTable(
                    "default stop of an ascending slice",
                ));
            }
        };

        if step == 1 {
            if start > stop {
                stop = start;
            }
        } else {
            let explicit = range.start.is_some() || range.stop.is_some();
            let empty = (step > 0 && start >= stop) || (step < 0 && start <= stop);
            if explicit && empty {
                return Err(TableError::EmptyExtendedRange { start, stop, step });
            }
        }

        Ok((start, stop, step))
    }
}

/// Normalized view of one axis of a key.
#[derive(Debug)]
pub struct Slicer {
    start: isize,
    stop: isize,
    step: isize,
    last: isize,
    min: isize,
    max: isize,
    size: usize,
    span: usize,
    single: bool,
    forward: OnceCell<Vec<usize>>,
    increasing: OnceCell<Vec<usize>>,
    decreasing: OnceCell<Vec<usize>>,
}

impl Slicer {
    /// Normalize `key` against a container of `len` positions.
    pub fn new(len: usize, key: impl Into<Key>) -> Result<Self, TableError> {
        Self::with_extent(Extent::uniform(len), key.into())
    }

    /// Normalize `key` against an arbitrary axis extent.
    pub fn with_extent(extent: Extent, key: Key) -> Result<Self, TableError> {
        match key {
            Key::Index(index) => extent.normalize_index(index).map(Self::single),
            Key::Range(range) => Self::range(extent, &range),
        }
    }

    /// A slicer visiting exactly `index`.
    pub fn single(index: usize) -> Self {
        let at = isize::try_from(index).unwrap_or(isize::MAX);
        Self {
            start: at,
            stop: at + 1,
            step: 1,
            last: at,
            min: at,
            max: at,
            size: 1,
            span: 1,
            single: true,
            forward: OnceCell::new(),
            increasing: OnceCell::new(),
            decreasing: OnceCell::new(),
        }
    }

    /// Normalize a range and derive its statistics.
    pub fn range(extent: Extent, range: &SliceRange) -> Result<Self, TableError> {
        let (start, stop, step) = extent.normalize_range(range)?;

        let distance = (stop - start).unsigned_abs();
        let stride = step.unsigned_abs();
        let (quotient, remainder) = (distance / stride, distance % stride);
        let (last, size) = if remainder != 0 {
            let remainder = remainder as isize;
            let last = if step > 0 {
                stop - remainder
            } else {
                stop + remainder
            };
            (last, quotient + 1)
        } else {
            (stop - step, quotient)
        };
        let (min, max) = if start <= last {
            (start, last)
        } else {
            (last, start)
        };

        Ok(Self {
            start,
            stop,
            step,
            last,
            min,
            max,
            size,
            span: (max - min + 1).unsigned_abs(),
            single: false,
            forward: OnceCell::new(),
            increasing: OnceCell::new(),
            decreasing: OnceCell::new(),
        })
    }

    #[inline]
    pub fn start(&self) -> isize {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> isize {
        self.stop
    }

    #[inline]
    pub fn step(&self) -> isize {
        self.step
    }

    /// Final visited position (meaningful when `size > 0`).
    #[inline]
    pub fn last(&self) -> isize {
        self.last
    }

    #[inline]
    pub fn min(&self) -> isize {
        self.min
    }

    #[inline]
    pub fn max(&self) -> isize {
        self.max
    }

    /// Number of visited positions.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn span(&self) -> usize {
        self.span
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether the key was a single index rather than a range.
    #[inline]
    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Whether the step has magnitude greater than one.
    #[inline]
    pub fn is_extended(&self) -> bool {
        self.step.unsigned_abs() != 1
    }

    /// `start..stop` when the step is 1.
    pub fn contiguous(&self) -> Option<std::ops::Range<usize>> {
        (self.step == 1).then(|| self.start.unsigned_abs()..self.stop.unsigned_abs())
    }

    /// Visited positions in key order (`start`, `start + step`, …).
    pub fn forward(&self) -> &[usize] {
        self.forward.get_or_init(|| {
            let mut out = Vec::with_capacity(self.size);
            let mut i = self.start;
            for _ in 0..self.size {
                out.push(i.unsigned_abs());
                i += self.step;
            }
            out
        })
    }

    /// Visited positions, ascending.
    pub fn increasing(&self) -> &[usize] {
        self.increasing.get_or_init(|| {
            let mut out = self.forward().to_vec();
            if self.step < 0 {
                out.reverse();
            }
            out
        })
    }

    /// Visited positions, descending.
    pub fn decreasing(&self) -> &[usize] {
        self.decreasing.get_or_init(|| {
            let mut out = self.increasing().to_vec();
            out.reverse();
            out
        })
    }

    /// Copy the visited items of `items`, in key order.
    pub(crate) fn gather<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.forward().iter().map(|&i| items[i].clone()).collect()
    }

    /// Fail unless `count` replacement items fit this range.
    ///
    /// Step 1 ranges accept any count; every other step needs exactly `size`.
    pub(crate) fn check_assign_len(&self, count: usize) -> Result<(), TableError> {
        if self.step != 1 && count != self.size {
            return Err(TableError::SizeMismatch {
                expected: self.size,
                found: count,
            });
        }
        Ok(())
    }

    /// Replace the visited items with `new`; step 1 ranges may grow or shrink `items`.
    pub(crate) fn assign<T>(&self, items: &mut Vec<T>, new: Vec<T>) -> Result<(), TableError> {
        self.check_assign_len(new.len())?;
        match self.contiguous() {
            Some(range) => {
                items.splice(range, new);
            }
            None => {
                for (&i, item) in self.forward().iter().zip(new) {
                    items[i] = item;
                }
            }
        }
        Ok(())
    }

    /// Remove the visited items that exist in `items`.
    pub(crate) fn remove<T>(&self, items: &mut Vec<T>) {
        if let Some(range) = self.contiguous() {
            let end = range.end.min(items.len());
            let start = range.start.min(end);
            items.drain(start..end);
            return;
        }
        for &i in self.decreasing() {
            if i < items.len() {
                items.remove(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slicer(len: usize, start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Slicer {
        Slicer::range(Extent::uniform(len), &SliceRange::new(start, stop, step)).unwrap()
    }

    #[test]
    fn negative_index_counts_from_end() {
        let s = Slicer::new(5, -1).unwrap();
        assert!(s.is_single());
        assert_eq!(s.forward(), &[4]);
        assert_eq!((s.min(), s.max(), s.size(), s.span()), (4, 4, 1, 1));
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(
            Slicer::new(3, 3).unwrap_err(),
            TableError::IndexOutOfRange { index: 3, len: 3 }
        );
        assert_eq!(
            Slicer::new(3, -4).unwrap_err(),
            TableError::IndexOutOfRange { index: -4, len: 3 }
        );
    }

    #[test]
    fn defaults_follow_step_sign() {
        let up = slicer(4, None, None, None);
        assert_eq!((up.start(), up.stop(), up.step()), (0, 4, 1));
        assert_eq!(up.forward(), &[0, 1, 2, 3]);

        let down = slicer(4, None, None, Some(-1));
        assert_eq!((down.start(), down.stop(), down.step()), (3, -1, -1));
        assert_eq!(down.forward(), &[3, 2, 1, 0]);
        assert_eq!(down.increasing(), &[0, 1, 2, 3]);
    }

    #[test]
    fn remainder_statistics() {
        // 0, 2, 4
        let s = slicer(6, Some(0), Some(5), Some(2));
        assert_eq!((s.last(), s.size(), s.min(), s.max(), s.span()), (4, 3, 0, 4, 5));
        // 0, 2
        let s = slicer(6, Some(0), Some(4), Some(2));
        assert_eq!((s.last(), s.size()), (2, 2));
        // 4, 2, 0
        let s = slicer(6, Some(4), None, Some(-2));
        assert_eq!((s.last(), s.size(), s.min(), s.max()), (0, 3, 0, 4));
        assert_eq!(s.forward(), &[4, 2, 0]);
        assert_eq!(s.decreasing(), &[4, 2, 0]);
        assert_eq!(s.increasing(), &[0, 2, 4]);
    }

    #[test]
    fn inverted_unit_range_collapses() {
        let s = slicer(5, Some(3), Some(1), None);
        assert_eq!((s.start(), s.stop(), s.size()), (3, 3, 0));
        assert!(s.forward().is_empty());
    }

    #[test]
    fn empty_extended_range_rejected() {
        let err = Slicer::range(Extent::uniform(5), &SliceRange::new(Some(3), Some(3), Some(2)))
            .unwrap_err();
        assert_eq!(
            err,
            TableError::EmptyExtendedRange {
                start: 3,
                stop: 3,
                step: 2
            }
        );
        assert!(matches!(
            Slicer::range(Extent::uniform(5), &SliceRange::new(Some(1), Some(3), Some(-1))),
            Err(TableError::EmptyExtendedRange { .. })
        ));
    }

    #[test]
    fn zero_step_rejected() {
        assert_eq!(
            Slicer::new(3, SliceRange::stepped(0)).unwrap_err(),
            TableError::InvalidStep
        );
    }

    #[test]
    fn end_position_is_a_valid_start() {
        let s = slicer(3, Some(3), Some(3), None);
        assert_eq!(s.contiguous(), Some(3..3));
        assert!(Slicer::new(3, SliceRange::new(Some(4), None, None)).is_err());
        assert!(Slicer::new(3, SliceRange::new(Some(3), None, Some(-1))).is_err());
    }

    #[test]
    fn jagged_axis_rejects_ambiguous_bounds() {
        let cols = Extent::columns(Some(1), Some(3));
        assert!(cols.is_jagged());
        assert_eq!(
            cols.normalize_index(-1).unwrap_err(),
            TableError::AmbiguousBoundInJaggedTable("index")
        );
        assert!(matches!(
            Slicer::with_extent(cols, Key::from(0..)),
            Err(TableError::AmbiguousBoundInJaggedTable(_))
        ));
        assert!(matches!(
            Slicer::with_extent(cols, Key::Range(SliceRange::stepped(-1))),
            Err(TableError::AmbiguousBoundInJaggedTable(_))
        ));
        // explicit non-negative bounds are fine
        let s = Slicer::with_extent(cols, Key::from(0..3)).unwrap();
        assert_eq!(s.size(), 3);
        // descending with explicit start needs no length
        let s = Slicer::with_extent(cols, Key::Range(SliceRange::new(Some(2), None, Some(-1))))
            .unwrap();
        assert_eq!(s.forward(), &[2, 1, 0]);
    }

    #[test]
    fn empty_container_default_ranges() {
        let up = slicer(0, None, None, Some(2));
        assert!(up.is_empty());
        let down = slicer(0, None, None, Some(-1));
        assert!(down.is_empty());
        assert!(down.forward().is_empty());
    }
}
