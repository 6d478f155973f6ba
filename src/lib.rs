#![cfg_attr(docsrs, feature(doc_cfg))]
//! # jagged-table
//!
//! jagged-table provides type-constrained containers with precise
//! extended-slice semantics: a one-dimensional [`Sequence`](sequence::Sequence)
//! and a two-dimensional, possibly jagged [`Table`](table::Table) of sequence
//! rows, plus a [`LabelRegistry`](labels::LabelRegistry) for unique row labels.
//!
//! ## Features
//! - Negative indices and strided (extended) slices, validated up front
//! - Element kinds checked against a [`TypeConstraint`](value::TypeConstraint)
//!   before any change is applied; a failed call leaves the container as it was
//! - Cell and rectangular indexing over rows of unequal length, reading gaps
//!   as `Absent` and padding short rows on write
//! - Lazily cached row-length statistics with explicit invalidation
//! - Line-oriented text loading and saving for delimited tables
//!
//! ## Usage
//!
//! ```rust
//! # fn try_main() -> Result<(), jagged_table::table_error::TableError> {
//! use jagged_table::prelude::*;
//!
//! let mut table = Table::new([values![1, 2, 3], values![4], values![5, 6]])?;
//! table.set_rect(1, 1..3, [values![7, 8]])?;
//! assert_eq!(table.row_lengths(), &[3, 3, 2]);
//! table.set_label(0, "first")?;
//! assert_eq!(table.row_by_label("first")?.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Invariant checking
//! Containers validate their invariants after mutation in debug builds. Enable
//! the `check-invariants` feature to keep those checks in release builds.

pub mod cache;
pub mod debug_invariants;
pub mod labels;
pub mod sequence;
pub mod slicer;
pub mod table;
pub mod table_error;
pub mod text_io;
pub mod value;

pub use cache::InvalidateCache;
pub use debug_invariants::DebugInvariants;
pub use table_error::TableError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::cache::InvalidateCache;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::labels::LabelRegistry;
    pub use crate::sequence::{Selection, Sequence};
    pub use crate::slicer::{Key, SliceRange};
    pub use crate::table::{CellRange, RectSelection, RowType, Table, TableBuilder};
    pub use crate::table_error::TableError;
    pub use crate::value::{KindSettings, TypeConstraint, Value, ValueKind};
    pub use crate::values;
}
