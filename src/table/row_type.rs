//! Row-type descriptor: names the kind of row a table holds and optionally
//! vets each row before it is stored.

use std::fmt;

use crate::table_error::TableError;
use crate::value::Value;

/// Signature of a row check; the `Err` string becomes the rejection reason.
pub type RowCheck = fn(&[Value]) -> Result<(), String>;

/// Descriptor shared by every row of a table.
///
/// Two row types are the same iff their names are equal.
#[derive(Clone, Copy)]
pub struct RowType {
    name: &'static str,
    check: Option<RowCheck>,
}

impl RowType {
    /// Plain sequence rows with no extra checks.
    pub const SEQUENCE: RowType = RowType::new("sequence");

    pub const fn new(name: &'static str) -> Self {
        Self { name, check: None }
    }

    /// A row type whose rows must pass `check`.
    pub const fn with_check(name: &'static str, check: RowCheck) -> Self {
        Self {
            name,
            check: Some(check),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn has_check(&self) -> bool {
        self.check.is_some()
    }

    /// Run the row check, if any.
    ///
    /// # Errors
    /// `InvalidRow` carrying the check's reason.
    pub fn validate(&self, row: &[Value]) -> Result<(), TableError> {
        match self.check {
            Some(check) => check(row).map_err(|reason| TableError::InvalidRow {
                row_type: self.name,
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl Default for RowType {
    fn default() -> Self {
        Self::SEQUENCE
    }
}

impl PartialEq for RowType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for RowType {}

impl fmt::Debug for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowType")
            .field("name", &self.name)
            .field("checked", &self.check.is_some())
            .finish()
    }
}
