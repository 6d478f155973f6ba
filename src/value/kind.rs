//! Element kinds and kind sets.

use std::fmt;

use bitflags::bitflags;

/// Kind tag for a [`Value`](super::Value).
///
/// The declaration order is the canonical order used when kind sets are
/// displayed or compared.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Absent,
    Bool,
    Int,
    Float,
    Complex,
    Str,
}

impl ValueKind {
    /// Every kind, in canonical order.
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Absent,
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::Float,
        ValueKind::Complex,
        ValueKind::Str,
    ];

    /// Returns a stable string label for the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Absent => "absent",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Complex => "complex",
            ValueKind::Str => "str",
        }
    }

    /// Parse a kind from a string label.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "absent" => Some(ValueKind::Absent),
            "bool" => Some(ValueKind::Bool),
            "int" => Some(ValueKind::Int),
            "float" => Some(ValueKind::Float),
            "complex" => Some(ValueKind::Complex),
            "str" => Some(ValueKind::Str),
            _ => None,
        }
    }

    /// The single-member kind set for this kind.
    pub const fn flag(self) -> KindSet {
        match self {
            ValueKind::Absent => KindSet::ABSENT,
            ValueKind::Bool => KindSet::BOOL,
            ValueKind::Int => KindSet::INT,
            ValueKind::Float => KindSet::FLOAT,
            ValueKind::Complex => KindSet::COMPLEX,
            ValueKind::Str => KindSet::STR,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Compact set of [`ValueKind`]s.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KindSet: u8 {
        const ABSENT = 1 << 0;
        const BOOL = 1 << 1;
        const INT = 1 << 2;
        const FLOAT = 1 << 3;
        const COMPLEX = 1 << 4;
        const STR = 1 << 5;
    }
}

impl KindSet {
    /// Kinds in the set, in canonical order.
    pub fn kinds(self) -> impl Iterator<Item = ValueKind> {
        ValueKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }

    /// Whether `kind` is a member.
    #[inline]
    pub fn has(self, kind: ValueKind) -> bool {
        self.contains(kind.flag())
    }
}

impl FromIterator<ValueKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = ValueKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(KindSet::empty(), |set, kind| set | kind.flag())
    }
}
