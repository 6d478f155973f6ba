//! Derived-statistics caching shared by the containers.
//!
//! A [`Cached`] slot is either *fresh* (holding a computed value) or *stale*
//! (empty). Containers mark slots stale on every structural mutation and
//! recompute them on the next read.

use once_cell::sync::OnceCell;

/// Anything that caches derived statistics (row lengths, extents, …)
/// should implement this.
pub trait InvalidateCache {
    /// Invalidate *all* internal caches so future queries recompute correctly.
    fn invalidate_cache(&mut self);
}

impl<T: InvalidateCache + ?Sized> InvalidateCache for Box<T> {
    #[inline]
    fn invalidate_cache(&mut self) {
        (**self).invalidate_cache();
    }
}

/// Lazily computed value with an explicit stale state.
#[derive(Debug)]
pub struct Cached<T> {
    slot: OnceCell<T>,
}

impl<T> Cached<T> {
    /// A stale slot.
    pub const fn stale() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    /// Returns the cached value, computing it first if the slot is stale.
    #[inline]
    pub fn get_or_compute(&self, compute: impl FnOnce() -> T) -> &T {
        self.slot.get_or_init(compute)
    }

    /// Returns the cached value only if it is fresh.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Whether the next read will recompute.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.slot.get().is_none()
    }

    /// Marks the slot stale, dropping any cached value.
    #[inline]
    pub fn invalidate(&mut self) {
        self.slot.take();
    }
}

impl<T> Default for Cached<T> {
    fn default() -> Self {
        Self::stale()
    }
}

// Clones start stale; the copy recomputes from its own contents.
impl<T> Clone for Cached<T> {
    fn clone(&self) -> Self {
        Self::stale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn computes_once_until_invalidated() {
        let calls = Cell::new(0);
        let mut cached = Cached::stale();
        assert!(cached.is_stale());

        let compute = || {
            calls.set(calls.get() + 1);
            7
        };
        assert_eq!(*cached.get_or_compute(compute), 7);
        assert_eq!(*cached.get_or_compute(|| unreachable!()), 7);
        assert_eq!(calls.get(), 1);

        cached.invalidate();
        assert!(cached.peek().is_none());
        assert_eq!(*cached.get_or_compute(|| 9), 9);
    }

    #[test]
    fn clone_starts_stale() {
        let cached = Cached::stale();
        cached.get_or_compute(|| 3);
        let copy = cached.clone();
        assert!(copy.is_stale());
        assert_eq!(cached.peek(), Some(&3));
    }
}
