//! TypeConstraint: the set of kinds a container accepts.

use std::fmt;

use itertools::Itertools;

use super::kind::{KindSet, ValueKind};
use super::settings::KindSettings;
use super::Value;
use crate::table_error::TableError;

/// Immutable, canonical set of permitted element kinds.
///
/// A constraint always contains [`ValueKind::Absent`]; two constraints are
/// equal iff their kind sets are equal. Constraints are `Copy` and travel by
/// value into every container derived from the one that owns them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "Vec<ValueKind>", try_from = "Vec<ValueKind>")]
pub struct TypeConstraint {
    kinds: KindSet,
}

impl TypeConstraint {
    /// Validate `kinds` against the standard settings.
    ///
    /// # Errors
    /// Never fails under [`KindSettings::standard`]; see
    /// [`with_settings`](Self::with_settings).
    pub fn new<I>(kinds: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = ValueKind>,
    {
        Self::with_settings(kinds, KindSettings::standard())
    }

    /// Validate `kinds` against `settings`.
    ///
    /// # Errors
    /// Returns `Err(InvalidConstraint)` if any kind is not supported.
    pub fn with_settings<I>(kinds: I, settings: &KindSettings) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = ValueKind>,
    {
        let mut set = KindSet::ABSENT;
        for kind in kinds {
            if !settings.supported().has(kind) {
                return Err(TableError::InvalidConstraint(format!(
                    "kind `{kind}` is not supported (settings v{})",
                    settings.version()
                )));
            }
            set |= kind.flag();
        }
        Ok(Self { kinds: set })
    }

    /// Build a constraint from kind names such as `"int"` or `"str"`.
    ///
    /// # Errors
    /// Returns `Err(InvalidConstraint)` for unknown names.
    pub fn parse<'a, I>(names: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let kinds = names
            .into_iter()
            .map(|name| {
                ValueKind::parse(name).ok_or_else(|| {
                    TableError::InvalidConstraint(format!("unknown kind name `{name}`"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(kinds)
    }

    /// The default constraint of the standard settings.
    pub fn standard() -> Self {
        Self::settings_default(KindSettings::standard())
    }

    /// The default constraint of `settings`.
    pub fn settings_default(settings: &KindSettings) -> Self {
        Self {
            kinds: settings.default_kinds() | KindSet::ABSENT,
        }
    }

    /// Kinds in canonical order.
    pub fn kinds(&self) -> impl Iterator<Item = ValueKind> {
        self.kinds.kinds()
    }

    #[inline]
    pub fn kind_set(&self) -> KindSet {
        self.kinds
    }

    #[inline]
    pub fn contains(&self, kind: ValueKind) -> bool {
        self.kinds.has(kind)
    }

    /// Whether every kind of `self` is also permitted by `other`.
    pub fn is_subset_of(&self, other: &TypeConstraint) -> bool {
        other.kinds.contains(self.kinds)
    }

    /// Pure predicate: does the constraint admit `value`?
    #[inline]
    pub fn accepts(&self, value: &Value) -> bool {
        self.kinds.has(value.kind())
    }

    /// Fail with `TypeMismatch` unless `value` is admitted.
    pub fn check(&self, value: &Value) -> Result<(), TableError> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(TableError::TypeMismatch {
                kind: value.kind(),
                allowed: *self,
            })
        }
    }

    /// Check every value, stopping at the first rejection.
    pub fn check_all<'a, I>(&self, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        values.into_iter().try_for_each(|value| self.check(value))
    }
}

impl Default for TypeConstraint {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.kinds().join(", "))
    }
}

impl fmt::Debug for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeConstraint{self}")
    }
}

impl TryFrom<Vec<ValueKind>> for TypeConstraint {
    type Error = TableError;

    fn try_from(kinds: Vec<ValueKind>) -> Result<Self, Self::Error> {
        Self::new(kinds)
    }
}

impl From<TypeConstraint> for Vec<ValueKind> {
    fn from(constraint: TypeConstraint) -> Self {
        constraint.kinds().collect()
    }
}
