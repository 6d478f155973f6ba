//! Values, kinds and type constraints.

pub mod constraint;
pub mod kind;
pub mod settings;

use std::fmt;

pub use constraint::TypeConstraint;
pub use kind::{KindSet, ValueKind};
pub use settings::KindSettings;

/// A single container element.
///
/// `Absent` is the null-like value every constraint admits; tables use it to
/// fill cells that lie beyond the end of a short row.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Real and imaginary parts; stored, never computed with.
    Complex(f64, f64),
    Str(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Absent => ValueKind::Absent,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Complex(..) => ValueKind::Complex,
            Value::Str(_) => ValueKind::Str,
        }
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("absent"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Complex(re, im) if im.is_sign_negative() => {
                write!(f, "({re:?}-{:?}i)", -im)
            }
            Value::Complex(re, im) => write!(f, "({re:?}+{im:?}i)"),
            Value::Str(s) => write!(f, "{s:?}"),
        }
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            #[inline]
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Absent
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

/// Build a `Vec<Value>` from heterogeneous literals; `()` is [`Value::Absent`].
///
/// ```rust
/// use jagged_table::{values, value::Value};
/// let row = values![1, "a", ()];
/// assert_eq!(row, vec![Value::Int(1), Value::from("a"), Value::Absent]);
/// ```
#[macro_export]
macro_rules! values {
    () => { ::std::vec::Vec::<$crate::value::Value>::new() };
    ($($x:expr),+ $(,)?) => {
        ::std::vec![$($crate::value::Value::from($x)),+]
    };
}
