//! Type descriptor model
//!
//! A closed set of type tags describing what a field may hold:
//! - primitives: bool, i8/i16/i32/i64, float/double, string, binary
//! - enums, declared by name with ordinal members
//! - containers: list, set, map
//! - references to other struct and union schemas
//!
//! Descriptors are pure data. Validation lives in `crate::value`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::record::{StructSchema, UnionSchema};

/// Bit width of an integral type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntWidth {
    /// 8-bit signed
    I8,
    /// 16-bit signed
    I16,
    /// 32-bit signed
    I32,
    /// 64-bit signed
    I64,
}

impl IntWidth {
    /// Number of bits in the representation.
    pub fn bits(&self) -> u32 {
        match self {
            IntWidth::I8 => 8,
            IntWidth::I16 => 16,
            IntWidth::I32 => 32,
            IntWidth::I64 => 64,
        }
    }

    /// Inclusive `(min, max)` range of a signed two's complement integer.
    pub fn bit_range(&self) -> (i128, i128) {
        let bits = self.bits();
        let max = (1i128 << (bits - 1)) - 1;
        let min = -(1i128 << (bits - 1));
        (min, max)
    }

    /// Returns true if `value` is representable at this width.
    pub fn contains(&self, value: i128) -> bool {
        let (min, max) = self.bit_range();
        min <= value && value <= max
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            IntWidth::I8 => "byte",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
        }
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Free function form of [`IntWidth::bit_range`].
pub fn bit_range(width: IntWidth) -> (i128, i128) {
    width.bit_range()
}

/// A declared enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    name: String,
    members: Vec<(String, i32)>,
}

impl EnumSchema {
    /// Create an enum type from its members in declaration order.
    pub fn new<N: Into<String>>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (N, i32)>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            members: members.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        })
    }

    /// Enum type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = EnumValue> + '_ {
        self.members.iter().map(|(n, v)| self.value_of(n, *v))
    }

    /// Look a member up by its symbolic name.
    pub fn member(&self, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|(n, _)| n == name)
            .map(|(n, v)| self.value_of(n, *v))
    }

    /// Look a member up by its ordinal.
    pub fn from_ordinal(&self, ordinal: i32) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|(_, v)| *v == ordinal)
            .map(|(n, v)| self.value_of(n, *v))
    }

    /// Returns true if `value` is one of this enum's members.
    pub fn contains(&self, value: &EnumValue) -> bool {
        value.enum_name() == self.name
            && self
                .members
                .iter()
                .any(|(n, v)| n == value.name() && *v == value.ordinal())
    }

    /// Member used when a field needs an implicit default: ordinal 0 if
    /// declared, otherwise the first member.
    pub fn default_member(&self) -> Option<EnumValue> {
        self.from_ordinal(0).or_else(|| self.members().next())
    }

    fn value_of(&self, name: &str, ordinal: i32) -> EnumValue {
        EnumValue {
            enum_name: Arc::from(self.name.as_str()),
            name: Arc::from(name),
            ordinal,
        }
    }
}

/// One member of a declared enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    enum_name: Arc<str>,
    name: Arc<str>,
    ordinal: i32,
}

impl EnumValue {
    /// Name of the enum type this member belongs to.
    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    /// Symbolic member name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying ordinal.
    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.enum_name, self.name)
    }
}

/// Declared type of a field, list element, set element, map key or map value.
#[derive(Debug, Clone)]
pub enum TypeTag {
    /// Boolean
    Bool,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// Single precision float
    Float32,
    /// Double precision float
    Float64,
    /// UTF-8 string
    Text,
    /// Raw bytes
    Binary,
    /// Member of a declared enum
    Enum(Arc<EnumSchema>),
    /// Ordered sequence of one element type
    List(Box<TypeTag>),
    /// Set of one element type
    Set(Box<TypeTag>),
    /// Mapping from key type to value type
    Map(Box<TypeTag>, Box<TypeTag>),
    /// Nested struct instance
    StructRef(Arc<StructSchema>),
    /// Nested union instance
    UnionRef(Arc<UnionSchema>),
}

impl TypeTag {
    /// `list<elem>`
    pub fn list(elem: TypeTag) -> Self {
        TypeTag::List(Box::new(elem))
    }

    /// `set<elem>`
    pub fn set(elem: TypeTag) -> Self {
        TypeTag::Set(Box::new(elem))
    }

    /// `map<key, value>`
    pub fn map(key: TypeTag, value: TypeTag) -> Self {
        TypeTag::Map(Box::new(key), Box::new(value))
    }

    /// Integral width, if this is an integral type.
    pub fn int_width(&self) -> Option<IntWidth> {
        match self {
            TypeTag::Int8 => Some(IntWidth::I8),
            TypeTag::Int16 => Some(IntWidth::I16),
            TypeTag::Int32 => Some(IntWidth::I32),
            TypeTag::Int64 => Some(IntWidth::I64),
            _ => None,
        }
    }

    /// Returns true for `Float32` and `Float64`.
    pub fn is_floating(&self) -> bool {
        matches!(self, TypeTag::Float32 | TypeTag::Float64)
    }

    /// Returns true for any integral or floating type.
    pub fn is_numeric(&self) -> bool {
        self.int_width().is_some() || self.is_floating()
    }

    /// Returns true if values of this type support a total order.
    pub fn is_orderable(&self) -> bool {
        match self {
            TypeTag::List(elem) | TypeTag::Set(elem) => elem.is_orderable(),
            TypeTag::Map(key, value) => key.is_orderable() && value.is_orderable(),
            TypeTag::StructRef(schema) => schema.is_orderable(),
            TypeTag::UnionRef(schema) => schema.is_orderable(),
            _ => true,
        }
    }

    /// Returns the type name for error messages
    pub fn type_name(&self) -> String {
        match self {
            TypeTag::Bool => "bool".into(),
            TypeTag::Int8 => IntWidth::I8.type_name().into(),
            TypeTag::Int16 => IntWidth::I16.type_name().into(),
            TypeTag::Int32 => IntWidth::I32.type_name().into(),
            TypeTag::Int64 => IntWidth::I64.type_name().into(),
            TypeTag::Float32 => "float".into(),
            TypeTag::Float64 => "double".into(),
            TypeTag::Text => "string".into(),
            TypeTag::Binary => "binary".into(),
            TypeTag::Enum(schema) => schema.name().to_string(),
            TypeTag::List(elem) => format!("list<{}>", elem.type_name()),
            TypeTag::Set(elem) => format!("set<{}>", elem.type_name()),
            TypeTag::Map(key, value) => {
                format!("map<{},{}>", key.type_name(), value.type_name())
            }
            TypeTag::StructRef(schema) => schema.name().to_string(),
            TypeTag::UnionRef(schema) => schema.name().to_string(),
        }
    }
}

/// Free function form of [`TypeTag::is_orderable`].
pub fn is_orderable(tag: &TypeTag) -> bool {
    tag.is_orderable()
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeTag::Enum(a), TypeTag::Enum(b)) => a.name() == b.name(),
            (TypeTag::List(a), TypeTag::List(b)) | (TypeTag::Set(a), TypeTag::Set(b)) => a == b,
            (TypeTag::Map(ak, av), TypeTag::Map(bk, bv)) => ak == bk && av == bv,
            (TypeTag::StructRef(a), TypeTag::StructRef(b)) => a.name() == b.name(),
            (TypeTag::UnionRef(a), TypeTag::UnionRef(b)) => a.name() == b.name(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}
