//! Runtime value representation
//!
//! `Value` is what callers hand to construct/replace and what instances
//! hand back from their accessors. Integral inputs are carried at 128 bits
//! so that out-of-range literals can be reported as overflow instead of
//! being truncated on the way in.
//!
//! Sets and maps are stored in canonical order (sorted by
//! [`canonical_cmp`](super::canonical::canonical_cmp), duplicates removed),
//! which makes equality and hashing independent of insertion order.

use std::fmt;

use crate::instance::{StructInstance, UnionInstance};
use crate::schema::EnumValue;

use super::canonical::{canonicalize_map, canonicalize_set};

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Boolean
    Bool(bool),
    /// Integral value of any width
    Int(i128),
    /// Floating point value
    Float(f64),
    /// UTF-8 string
    Text(String),
    /// Raw bytes
    Binary(Vec<u8>),
    /// Enum member
    Enum(EnumValue),
    /// Ordered sequence
    List(Vec<Value>),
    /// Set, canonical order, no duplicates
    Set(Vec<Value>),
    /// Map entries, canonical key order, unique keys
    Map(Vec<(Value, Value)>),
    /// Nested struct instance
    Struct(StructInstance),
    /// Nested union instance
    Union(UnionInstance),
}

impl Value {
    /// Build a list value.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a set value. Duplicates collapse.
    pub fn set<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Set(canonicalize_set(items.into_iter().map(Into::into).collect()))
    }

    /// Build a map value. For repeated keys the last entry wins.
    pub fn map<K: Into<Value>, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Value::Map(canonicalize_map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Build a binary value.
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Binary(bytes.into())
    }

    /// Short description of the runtime kind, for error messages.
    pub fn kind_name(&self) -> String {
        match self {
            Value::Bool(_) => "bool".into(),
            Value::Int(_) => "int".into(),
            Value::Float(_) => "float".into(),
            Value::Text(_) => "string".into(),
            Value::Binary(_) => "binary".into(),
            Value::Enum(e) => e.enum_name().to_string(),
            Value::List(_) => "list".into(),
            Value::Set(_) => "set".into(),
            Value::Map(_) => "map".into(),
            Value::Struct(s) => s.type_name().to_string(),
            Value::Union(u) => u.type_name().to_string(),
        }
    }

    /// The boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integral value narrowed to i64, if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_int().and_then(|i| i64::try_from(i).ok())
    }

    /// The float, if this is a `Float`. Integers are not widened here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The text, if this is `Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The bytes, if this is `Binary`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// The member, if this is an `Enum`.
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// The items, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The canonically ordered members, if this is a `Set`.
    pub fn as_set(&self) -> Option<&[Value]> {
        match self {
            Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// The canonically ordered entries, if this is a `Map`.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// The instance, if this is a `Struct`.
    pub fn as_struct(&self) -> Option<&StructInstance> {
        match self {
            Value::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// The instance, if this is a `Union`.
    pub fn as_union(&self) -> Option<&UnionInstance> {
        match self {
            Value::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Map lookup by key.
    pub fn get_entry(&self, key: &Value) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(v as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Value::Enum(v)
    }
}

impl From<StructInstance> for Value {
    fn from(v: StructInstance) -> Self {
        Value::Struct(v)
    }
}

impl From<UnionInstance> for Value {
    fn from(v: UnionInstance) -> Self {
        Value::Union(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::Binary(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::Enum(e) => write!(f, "{}", e),
            Value::List(items) => write_seq(f, "[", items, "]"),
            Value::Set(items) => write_seq(f, "{", items, "}"),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
            Value::Struct(s) => write!(f, "{}", s),
            Value::Union(u) => write!(f, "{}", u),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}
