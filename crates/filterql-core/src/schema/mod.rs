//! Field-type maps used to resolve and type filter conditions.
//!
//! A filter refers to fields by their wire-facing name. The parser looks each
//! name up in a [`FieldMap`] to find the column it stands for and the
//! [`FieldKind`] its values are converted to. Maps are usually produced by
//! `#[derive(Filterable)]`, built by hand, or deserialized from JSON.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The primitive kind of a filterable field.
///
/// The kind decides how raw condition values are converted before they are
/// bound as parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Text, passed through unchanged.
    String,
    /// A composite value compared by its string form (dates, UUIDs, ...).
    Struct,
    /// Platform-width signed integer.
    Int,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Boolean.
    Bool,
    /// Single-precision float.
    Float32,
    /// Double-precision float.
    Float64,
    /// Raw bytes. Not filterable by value.
    Bytes,
    /// A repeated field. Only `in`/`notin` apply, using the element kind.
    List(Box<FieldKind>),
}

impl FieldKind {
    /// Returns the element kind of a list, or `None` for scalar kinds.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::List(elem) => Some(elem),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Struct => write!(f, "struct"),
            Self::Int => write!(f, "int"),
            Self::Int8 => write!(f, "int8"),
            Self::Int16 => write!(f, "int16"),
            Self::Int32 => write!(f, "int32"),
            Self::Int64 => write!(f, "int64"),
            Self::Bool => write!(f, "bool"),
            Self::Float32 => write!(f, "float32"),
            Self::Float64 => write!(f, "float64"),
            Self::Bytes => write!(f, "bytes"),
            Self::List(elem) => write!(f, "list<{elem}>"),
        }
    }
}

/// What the parser knows about one filterable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    /// The column (struct field) name emitted into SQL.
    pub name: String,
    /// The kind values are converted to.
    pub kind: FieldKind,
    /// Whether the column is backed by an index.
    #[serde(default)]
    pub indexed: bool,
}

impl FieldInfo {
    /// Creates a non-indexed field.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            indexed: false,
        }
    }

    /// Marks the field as indexed.
    #[must_use]
    pub const fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

/// Wire-facing field name to field information.
pub type FieldMap = HashMap<String, FieldInfo>;

/// Maps a Rust type to the [`FieldKind`] its filter values convert to.
///
/// Implemented for the same scalar types as
/// [`ToSqlValue`](crate::value::ToSqlValue). Unsigned types map to the next
/// wider signed kind; `u64` and `usize` have no lossless kind and are left out.
pub trait HasFieldKind {
    /// Returns the kind.
    fn field_kind() -> FieldKind;
}

macro_rules! impl_has_field_kind {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl HasFieldKind for $ty {
                fn field_kind() -> FieldKind {
                    FieldKind::$kind
                }
            }
        )+
    };
}

impl_has_field_kind!(
    String => String,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Int16,
    u16 => Int32,
    u32 => Int64,
    bool => Bool,
    f32 => Float32,
    f64 => Float64,
);

impl<T: HasFieldKind> HasFieldKind for Option<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: HasFieldKind> HasFieldKind for Vec<T> {
    fn field_kind() -> FieldKind {
        FieldKind::List(Box::new(T::field_kind()))
    }
}

/// Types whose fields can be filtered on.
///
/// Implemented by `#[derive(Filterable)]`.
pub trait Filterable {
    /// Returns the field map for this type.
    fn filter_fields() -> FieldMap;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_from_types() {
        assert_eq!(String::field_kind(), FieldKind::String);
        assert_eq!(i32::field_kind(), FieldKind::Int32);
        assert_eq!(Option::<i64>::field_kind(), FieldKind::Int64);
        assert_eq!(isize::field_kind(), FieldKind::Int);
        assert_eq!(u8::field_kind(), FieldKind::Int16);
        assert_eq!(u16::field_kind(), FieldKind::Int32);
        assert_eq!(u32::field_kind(), FieldKind::Int64);
        assert_eq!(
            Vec::<String>::field_kind(),
            FieldKind::List(Box::new(FieldKind::String))
        );
    }

    #[test]
    fn test_field_info_builder() {
        let info = FieldInfo::new("UserId", FieldKind::Int).indexed();
        assert_eq!(info.name, "UserId");
        assert!(info.indexed);
        assert!(!FieldInfo::new("Name", FieldKind::String).indexed);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::Float32.to_string(), "float32");
        assert_eq!(
            FieldKind::List(Box::new(FieldKind::Int64)).to_string(),
            "list<int64>"
        );
    }

    #[test]
    fn test_list_element_kind() {
        let list = FieldKind::List(Box::new(FieldKind::Bool));
        assert_eq!(list.element(), Some(&FieldKind::Bool));
        assert_eq!(FieldKind::Bool.element(), None);
    }
}
