//! Frozen kind-set configuration.
//!
//! A [`KindSettings`] names which kinds a deployment supports and which kind
//! set containers fall back to when no constraint is given. Settings are
//! plain immutable values; nothing in the crate consults the host
//! environment to pick them.

use super::kind::{KindSet, ValueKind};

/// Versioned, immutable kind-set configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindSettings {
    version: u32,
    integer_kinds: KindSet,
    string_kinds: KindSet,
    supported: KindSet,
    default_kinds: KindSet,
}

static STANDARD: KindSettings = KindSettings::STANDARD;

impl KindSettings {
    /// Settings revision shipped with this crate.
    pub const CURRENT_VERSION: u32 = 1;

    /// Standard settings: every kind supported and used as the default.
    pub const STANDARD: KindSettings = KindSettings {
        version: Self::CURRENT_VERSION,
        integer_kinds: KindSet::INT,
        string_kinds: KindSet::STR,
        supported: KindSet::all(),
        default_kinds: KindSet::all(),
    };

    /// Process-wide standard settings.
    #[inline]
    pub fn standard() -> &'static KindSettings {
        &STANDARD
    }

    /// Settings restricted to `supported` kinds (plus [`ValueKind::Absent`]).
    ///
    /// The default kind set equals the supported set.
    pub fn restricted<I>(version: u32, supported: I) -> Self
    where
        I: IntoIterator<Item = ValueKind>,
    {
        let supported = supported.into_iter().collect::<KindSet>() | KindSet::ABSENT;
        Self {
            version,
            integer_kinds: KindSet::INT & supported,
            string_kinds: KindSet::STR & supported,
            supported,
            default_kinds: supported,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Kinds treated as integers.
    pub fn integer_kinds(&self) -> KindSet {
        self.integer_kinds
    }

    /// Kinds treated as strings.
    pub fn string_kinds(&self) -> KindSet {
        self.string_kinds
    }

    /// Kinds a [`TypeConstraint`](super::TypeConstraint) may name.
    pub fn supported(&self) -> KindSet {
        self.supported
    }

    /// Kinds used when a container is built without an explicit constraint.
    pub fn default_kinds(&self) -> KindSet {
        self.default_kinds
    }
}

impl Default for KindSettings {
    fn default() -> Self {
        Self::STANDARD
    }
}
