//! Struct and union schemas
//!
//! A schema is an ordered list of [`FieldSpec`]s. Declaration order is the
//! canonical order for comparison, hashing and display.
//!
//! Schemas are assembled with a builder that checks, once:
//! - field ids and canonical names are unique
//! - defaults are valid for their field type (and stores them coerced)
//! - Unqualified fields have a default, deriving the intrinsic one if needed
//! - union fields are never Required and carry no default
//! - external names are injective
//!
//! After `build` the schema is immutable and shared behind an `Arc`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::instance::{StructInstance, UnionInstance};
use crate::value::{validate, Args, Value, ValueError, ValueResult};

use super::errors::{SchemaError, SchemaResult};
use super::naming::Sanitizer;
use super::types::TypeTag;

/// Per-field presence contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Qualifier {
    /// Must always resolve to a value
    Required,
    /// May be absent
    Optional,
    /// Always has a value, the schema default when nothing else is given
    Unqualified,
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Required => write!(f, "required"),
            Qualifier::Optional => write!(f, "optional"),
            Qualifier::Unqualified => write!(f, "unqualified"),
        }
    }
}

/// A field as declared by the schema layer, before the builder resolves it.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    id: u16,
    name: String,
    qualifier: Qualifier,
    ty: TypeTag,
    default: Option<Value>,
}

impl FieldDecl {
    pub fn new(id: u16, name: impl Into<String>, qualifier: Qualifier, ty: TypeTag) -> Self {
        Self {
            id,
            name: name.into(),
            qualifier,
            ty,
            default: None,
        }
    }

    /// Declare a required field
    pub fn required(id: u16, name: impl Into<String>, ty: TypeTag) -> Self {
        Self::new(id, name, Qualifier::Required, ty)
    }

    /// Declare an optional field
    pub fn optional(id: u16, name: impl Into<String>, ty: TypeTag) -> Self {
        Self::new(id, name, Qualifier::Optional, ty)
    }

    /// Declare an unqualified field
    pub fn unqualified(id: u16, name: impl Into<String>, ty: TypeTag) -> Self {
        Self::new(id, name, Qualifier::Unqualified, ty)
    }

    /// Attach a schema default.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// A resolved field of a built schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    id: u16,
    canonical_name: String,
    external_name: String,
    qualifier: Qualifier,
    ty: TypeTag,
    default: Option<Value>,
}

impl FieldSpec {
    /// Wire index.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Name as written in the schema and on the wire.
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// Host-safe name used for construct, replace and read access.
    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    pub fn qualifier(&self) -> Qualifier {
        self.qualifier
    }

    pub fn ty(&self) -> &TypeTag {
        &self.ty
    }

    /// Validated default, if the field has one.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// Field list with name and id indexes.
#[derive(Debug, Clone)]
struct FieldTable {
    fields: Vec<FieldSpec>,
    by_external: HashMap<String, usize>,
    by_canonical: HashMap<String, usize>,
    by_id: HashMap<u16, usize>,
}

impl FieldTable {
    fn new(fields: Vec<FieldSpec>) -> Self {
        let mut by_external = HashMap::with_capacity(fields.len());
        let mut by_canonical = HashMap::with_capacity(fields.len());
        let mut by_id = HashMap::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            by_external.insert(field.external_name.clone(), idx);
            by_canonical.insert(field.canonical_name.clone(), idx);
            by_id.insert(field.id, idx);
        }
        Self {
            fields,
            by_external,
            by_canonical,
            by_id,
        }
    }
}

macro_rules! field_table_accessors {
    ($t:ty) => {
        impl $t {
            /// Type name.
            pub fn name(&self) -> &str {
                &self.name
            }

            /// Fields in declaration order.
            pub fn fields(&self) -> &[FieldSpec] {
                &self.table.fields
            }

            /// Whether instances of this type support ordering.
            pub fn is_orderable(&self) -> bool {
                self.orderable
            }

            /// Declaration position of the field with this external name.
            pub fn position(&self, external_name: &str) -> Option<usize> {
                self.table.by_external.get(external_name).copied()
            }

            /// Field by external name.
            pub fn field(&self, external_name: &str) -> Option<&FieldSpec> {
                self.position(external_name).map(|idx| &self.table.fields[idx])
            }

            /// Field by wire id.
            pub fn field_by_id(&self, id: u16) -> Option<&FieldSpec> {
                self.table.by_id.get(&id).map(|&idx| &self.table.fields[idx])
            }

            pub(crate) fn position_of_id(&self, id: u16) -> Option<usize> {
                self.table.by_id.get(&id).copied()
            }

            /// External name for a canonical name.
            pub fn canonical_to_external(&self, canonical: &str) -> Option<&str> {
                self.table
                    .by_canonical
                    .get(canonical)
                    .map(|&idx| self.table.fields[idx].external_name())
            }

            /// Canonical name for an external name.
            pub fn external_to_canonical(&self, external: &str) -> Option<&str> {
                self.field(external).map(FieldSpec::canonical_name)
            }
        }
    };
}

/// Schema of a struct type.
#[derive(Debug)]
pub struct StructSchema {
    name: String,
    table: FieldTable,
    orderable: bool,
}

/// Schema of a union type.
#[derive(Debug)]
pub struct UnionSchema {
    name: String,
    table: FieldTable,
    orderable: bool,
}

field_table_accessors!(StructSchema);
field_table_accessors!(UnionSchema);

impl StructSchema {
    /// Start declaring a struct type.
    pub fn builder(name: impl Into<String>) -> StructSchemaBuilder {
        StructSchemaBuilder {
            name: name.into(),
            decls: Vec::new(),
            comparable: true,
        }
    }
}

impl UnionSchema {
    /// Start declaring a union type.
    pub fn builder(name: impl Into<String>) -> UnionSchemaBuilder {
        UnionSchemaBuilder {
            name: name.into(),
            decls: Vec::new(),
            comparable: true,
        }
    }
}

/// Builder for [`StructSchema`].
#[derive(Debug, Clone)]
pub struct StructSchemaBuilder {
    name: String,
    decls: Vec<FieldDecl>,
    comparable: bool,
}

impl StructSchemaBuilder {
    /// Append a field declaration.
    pub fn field(mut self, decl: FieldDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Opt this type out of ordering. Equality and hashing still work.
    pub fn noncomparable(mut self) -> Self {
        self.comparable = false;
        self
    }

    /// Build with the default sanitizer.
    pub fn build(self) -> SchemaResult<Arc<StructSchema>> {
        self.build_with(&Sanitizer::default())
    }

    /// Build, assigning external names with `sanitizer`.
    pub fn build_with(self, sanitizer: &Sanitizer) -> SchemaResult<Arc<StructSchema>> {
        let fields = resolve_fields(&self.name, self.decls, sanitizer, |decl| {
            match (&decl.default, decl.qualifier) {
                (Some(_), _) | (None, Qualifier::Required | Qualifier::Optional) => Ok(None),
                (None, Qualifier::Unqualified) => intrinsic_default(&decl.ty).map(Some),
            }
        })?;
        let orderable = self.comparable && fields.iter().all(|f| f.ty.is_orderable());

        Ok(Arc::new(StructSchema {
            name: self.name,
            table: FieldTable::new(fields),
            orderable,
        }))
    }
}

/// Builder for [`UnionSchema`].
#[derive(Debug, Clone)]
pub struct UnionSchemaBuilder {
    name: String,
    decls: Vec<FieldDecl>,
    comparable: bool,
}

impl UnionSchemaBuilder {
    /// Append a field declaration. Qualifiers other than Required are
    /// accepted and behave identically.
    pub fn field(mut self, decl: FieldDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Opt this type out of ordering.
    pub fn noncomparable(mut self) -> Self {
        self.comparable = false;
        self
    }

    /// Build with the default sanitizer.
    pub fn build(self) -> SchemaResult<Arc<UnionSchema>> {
        self.build_with(&Sanitizer::default())
    }

    /// Build, assigning external names with `sanitizer`.
    pub fn build_with(self, sanitizer: &Sanitizer) -> SchemaResult<Arc<UnionSchema>> {
        for decl in &self.decls {
            let reason = if decl.qualifier == Qualifier::Required {
                "union fields cannot be required"
            } else if decl.default.is_some() {
                "union fields cannot carry a default"
            } else {
                continue;
            };
            return Err(SchemaError::InvalidUnionField {
                type_name: self.name.clone(),
                field: decl.name.clone(),
                reason: reason.into(),
            });
        }

        let fields = resolve_fields(&self.name, self.decls, sanitizer, |_| Ok(None))?;
        let orderable = self.comparable && fields.iter().all(|f| f.ty.is_orderable());

        Ok(Arc::new(UnionSchema {
            name: self.name,
            table: FieldTable::new(fields),
            orderable,
        }))
    }
}

/// Shared builder pass: uniqueness, external names, validated defaults.
///
/// `fallback` supplies a default for declarations that carry none.
fn resolve_fields(
    type_name: &str,
    decls: Vec<FieldDecl>,
    sanitizer: &Sanitizer,
    fallback: impl Fn(&FieldDecl) -> ValueResult<Option<Value>>,
) -> SchemaResult<Vec<FieldSpec>> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for decl in &decls {
        if !ids.insert(decl.id) {
            return Err(SchemaError::DuplicateFieldId {
                type_name: type_name.to_string(),
                id: decl.id,
            });
        }
        if !names.insert(decl.name.as_str()) {
            return Err(SchemaError::DuplicateFieldName {
                type_name: type_name.to_string(),
                name: decl.name.clone(),
            });
        }
    }

    let canonical: Vec<&str> = decls.iter().map(|d| d.name.as_str()).collect();
    let external = sanitizer.assign(type_name, &canonical);

    decls
        .into_iter()
        .zip(external)
        .map(|(decl, external_name)| {
            let invalid_default = |source: ValueError| SchemaError::InvalidDefault {
                type_name: type_name.to_string(),
                field: decl.name.clone(),
                source,
            };

            let default = match fallback(&decl).map_err(invalid_default)? {
                Some(intrinsic) => Some(intrinsic),
                None => match decl.default.clone() {
                    Some(value) => {
                        let path = format!("{}.{}", type_name, decl.name);
                        Some(validate(value, &decl.ty, &path).map_err(invalid_default)?)
                    }
                    None => None,
                },
            };

            Ok(FieldSpec {
                id: decl.id,
                canonical_name: decl.name,
                external_name,
                qualifier: decl.qualifier,
                ty: decl.ty,
                default,
            })
        })
        .collect()
}

/// The value an Unqualified field holds when the schema names no default.
fn intrinsic_default(ty: &TypeTag) -> ValueResult<Value> {
    Ok(match ty {
        TypeTag::Bool => Value::Bool(false),
        TypeTag::Int8 | TypeTag::Int16 | TypeTag::Int32 | TypeTag::Int64 => Value::Int(0),
        TypeTag::Float32 | TypeTag::Float64 => Value::Float(0.0),
        TypeTag::Text => Value::Text(String::new()),
        TypeTag::Binary => Value::Binary(Vec::new()),
        TypeTag::Enum(schema) => Value::Enum(schema.default_member().ok_or_else(|| {
            ValueError::invalid_argument(schema.name(), "enum declares no members")
        })?),
        TypeTag::List(_) => Value::List(Vec::new()),
        TypeTag::Set(_) => Value::Set(Vec::new()),
        TypeTag::Map(_, _) => Value::Map(Vec::new()),
        TypeTag::StructRef(schema) => Value::Struct(StructInstance::new(schema, Args::new())?),
        TypeTag::UnionRef(schema) => Value::Union(UnionInstance::empty(schema)),
    })
}
