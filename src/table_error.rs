//! TableError: Unified error type for jagged-table public APIs
//!
//! Every fallible operation on sequences, tables and label registries
//! reports failure through this enum. Each variant names one violated
//! condition so callers can recover by matching on the kind.

use thiserror::Error;

use crate::value::{TypeConstraint, ValueKind};

/// Unified error type for container operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A kind set could not be expressed with the supported kinds.
    #[error("Invalid type constraint: {0}")]
    InvalidConstraint(String),
    /// A value's kind is not permitted by the container's constraint.
    #[error("Value of kind `{kind}` not permitted; allowed kinds are {allowed}")]
    TypeMismatch {
        kind: ValueKind,
        allowed: TypeConstraint,
    },
    /// A normalized index or bound fell outside the container.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },
    /// A slice step of zero was requested.
    #[error("Slice step cannot be zero")]
    InvalidStep,
    /// An extended slice (step != 1) normalized to zero elements.
    #[error("Extended slice {start}:{stop}:{step} is of size 0")]
    EmptyExtendedRange {
        start: isize,
        stop: isize,
        step: isize,
    },
    /// Number of assigned values does not match the slice size.
    #[error("Cannot assign {found} values to extended slice of size {expected}")]
    SizeMismatch { expected: usize, found: usize },
    /// Two containers cannot be combined or compared.
    #[error("Incompatible containers: {0}")]
    IncompatibleTypes(String),
    /// A default or negative column bound was used while row lengths differ.
    #[error("Column {0} is ambiguous in a jagged table")]
    AmbiguousBoundInJaggedTable(&'static str),
    /// A concrete (row, column) pair lies beyond the addressed row.
    #[error("Cell ({row}, {col}) out of range")]
    CellOutOfRange { row: usize, col: usize },
    /// Double indexing cannot add or remove rows.
    #[error("Cannot use double-indexing to create/delete rows: expected {expected} rows, found {found}")]
    CannotResizeViaDoubleIndex { expected: usize, found: usize },
    /// An assigned row does not fit the addressed columns.
    #[error("Cannot assign row of length {found} to {expected} column(s)")]
    JaggedAssignmentMismatch { expected: usize, found: usize },
    /// A write would leave unwritten gap cells at the end of a row.
    #[error("Cannot assign to disjoint slice beyond the end of row {row}")]
    DisjointSliceWrite { row: usize },
    /// The label is already bound to another index.
    #[error("Duplicate label `{label}` (already bound to index {index})")]
    DuplicateLabel { label: String, index: usize },
    /// The empty string marks an unset label and cannot be assigned.
    #[error("Empty string cannot be used as a label")]
    EmptyLabelRejected,
    /// No slot holds the requested label.
    #[error("Label `{0}` not found")]
    LabelNotFound(String),
    /// A search found no matching value.
    #[error("Value not found")]
    ValueNotFound,
    /// A search range normalized to zero positions.
    #[error("Iteration range has length zero")]
    RangeIsEmpty,
    /// A row was rejected by the table's row type.
    #[error("Row rejected by row type `{row_type}`: {reason}")]
    InvalidRow {
        row_type: &'static str,
        reason: String,
    },
}
