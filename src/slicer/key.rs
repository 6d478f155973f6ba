//! Index keys: a single position or a start/stop/step range.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// A half-open, optionally strided range whose parts may be omitted.
///
/// Omitted parts take defaults that depend on the sign of the step; see
/// [`Slicer`](super::Slicer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SliceRange {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl SliceRange {
    /// Every position, ascending.
    pub const FULL: SliceRange = SliceRange::new(None, None, None);

    pub const fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// Zero-width range at `index`, used for insertion.
    pub const fn at(index: isize) -> Self {
        Self::new(Some(index), Some(index), None)
    }

    /// Same bounds, explicit step.
    pub const fn with_step(self, step: isize) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Full range with the given step, e.g. `SliceRange::stepped(-1)` for reversal.
    pub const fn stepped(step: isize) -> Self {
        Self::FULL.with_step(step)
    }
}

/// Key accepted by the indexing operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Index(isize),
    Range(SliceRange),
}

impl Key {
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }
}

impl From<SliceRange> for Key {
    fn from(range: SliceRange) -> Self {
        Key::Range(range)
    }
}

impl From<RangeFull> for SliceRange {
    fn from(_: RangeFull) -> Self {
        SliceRange::FULL
    }
}

impl From<RangeFull> for Key {
    fn from(_: RangeFull) -> Self {
        Key::Range(SliceRange::FULL)
    }
}

#[inline]
fn to_isize<T: TryInto<isize>>(v: T) -> isize {
    v.try_into().unwrap_or(isize::MAX)
}

macro_rules! key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(index: $t) -> Self {
                    Key::Index(to_isize(index))
                }
            }

            impl From<Range<$t>> for SliceRange {
                fn from(r: Range<$t>) -> Self {
                    SliceRange::new(Some(to_isize(r.start)), Some(to_isize(r.end)), None)
                }
            }

            impl From<RangeFrom<$t>> for SliceRange {
                fn from(r: RangeFrom<$t>) -> Self {
                    SliceRange::new(Some(to_isize(r.start)), None, None)
                }
            }

            impl From<RangeTo<$t>> for SliceRange {
                fn from(r: RangeTo<$t>) -> Self {
                    SliceRange::new(None, Some(to_isize(r.end)), None)
                }
            }

            impl From<Range<$t>> for Key {
                fn from(r: Range<$t>) -> Self {
                    Key::Range(r.into())
                }
            }

            impl From<RangeFrom<$t>> for Key {
                fn from(r: RangeFrom<$t>) -> Self {
                    Key::Range(r.into())
                }
            }

            impl From<RangeTo<$t>> for Key {
                fn from(r: RangeTo<$t>) -> Self {
                    Key::Range(r.into())
                }
            }
        )*
    };
}

key_from_int!(i32, i64, isize, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_ranges_convert() {
        assert_eq!(Key::from(-1), Key::Index(-1));
        assert_eq!(
            Key::from(1..3),
            Key::Range(SliceRange::new(Some(1), Some(3), None))
        );
        assert_eq!(SliceRange::from(2..), SliceRange::new(Some(2), None, None));
        assert_eq!(SliceRange::from(..-1), SliceRange::new(None, Some(-1), None));
        assert_eq!(Key::from(..), Key::Range(SliceRange::FULL));
        assert_eq!(
            SliceRange::from(0..6).with_step(2),
            SliceRange::new(Some(0), Some(6), Some(2))
        );
    }
}
