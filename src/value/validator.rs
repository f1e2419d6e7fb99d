//! Recursive value validator
//!
//! One dispatch over [`TypeTag`]:
//! - numeric tags delegate to [`coerce`]
//! - bool, string and binary must match exactly (no truthiness, no decoding)
//! - enum values must be members of the declared enum
//! - lists, sets and maps validate every element, key and value
//! - struct and union values must be built from the declared schema itself,
//!   not merely one with the same name
//!
//! Validation consumes the supplied value and returns the stored form. A
//! single bad element fails the whole container.

use std::sync::Arc;

use crate::schema::TypeTag;

use super::canonical::{canonicalize_map, canonicalize_set};
use super::coerce::coerce;
use super::errors::{ValueError, ValueResult};
use super::value::Value;

/// Validate `value` against `ty`, returning the value to store.
///
/// # Errors
///
/// Returns `InvalidArgument` or `NumericOverflow` naming the offending path.
pub fn validate(value: Value, ty: &TypeTag, path: &str) -> ValueResult<Value> {
    match ty {
        TypeTag::Int8
        | TypeTag::Int16
        | TypeTag::Int32
        | TypeTag::Int64
        | TypeTag::Float32
        | TypeTag::Float64 => coerce(value, ty, path),
        TypeTag::Bool => match value {
            Value::Bool(b) => Ok(Value::Bool(b)),
            other => Err(mismatch(path, ty, &other)),
        },
        TypeTag::Text => match value {
            Value::Text(s) => Ok(Value::Text(s)),
            other => Err(mismatch(path, ty, &other)),
        },
        TypeTag::Binary => match value {
            Value::Binary(b) => Ok(Value::Binary(b)),
            other => Err(mismatch(path, ty, &other)),
        },
        TypeTag::Enum(schema) => match value {
            Value::Enum(member) if schema.contains(&member) => Ok(Value::Enum(member)),
            Value::Enum(member) => Err(ValueError::invalid_argument(
                path,
                format!("{} is not a member of enum {}", member, schema.name()),
            )),
            other => Err(ValueError::invalid_argument(
                path,
                format!("expected a member of enum {}, got {}", schema.name(), describe(&other)),
            )),
        },
        TypeTag::List(elem) => match value {
            Value::List(items) => validate_items(items, elem, path).map(Value::List),
            other => Err(mismatch(path, ty, &other)),
        },
        TypeTag::Set(elem) => match value {
            // a list is accepted as the source of a set
            Value::Set(items) | Value::List(items) => {
                validate_items(items, elem, path).map(|items| Value::Set(canonicalize_set(items)))
            }
            other => Err(mismatch(path, ty, &other)),
        },
        TypeTag::Map(key_ty, value_ty) => match value {
            Value::Map(entries) => {
                let mut validated = Vec::with_capacity(entries.len());
                for (i, (k, v)) in entries.into_iter().enumerate() {
                    let k = validate(k, key_ty, &format!("{}{{{}}}", path, i))?;
                    let v = validate(v, value_ty, &format!("{}[{}]", path, k))?;
                    validated.push((k, v));
                }
                Ok(Value::Map(canonicalize_map(validated)))
            }
            other => Err(mismatch(path, ty, &other)),
        },
        TypeTag::StructRef(schema) => match value {
            Value::Struct(instance) if Arc::ptr_eq(instance.schema(), schema) => {
                Ok(Value::Struct(instance))
            }
            Value::Struct(instance) if instance.type_name() == schema.name() => {
                Err(foreign_schema(path, schema.name()))
            }
            other => Err(mismatch(path, ty, &other)),
        },
        TypeTag::UnionRef(schema) => match value {
            Value::Union(instance) if Arc::ptr_eq(instance.schema(), schema) => {
                Ok(Value::Union(instance))
            }
            Value::Union(instance) if instance.type_name() == schema.name() => {
                Err(foreign_schema(path, schema.name()))
            }
            other => Err(mismatch(path, ty, &other)),
        },
    }
}

fn validate_items(items: Vec<Value>, elem: &TypeTag, path: &str) -> ValueResult<Vec<Value>> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| validate(item, elem, &format!("{}[{}]", path, i)))
        .collect()
}

fn mismatch(path: &str, expected: &TypeTag, actual: &Value) -> ValueError {
    ValueError::type_mismatch(path, expected, describe(actual))
}

fn foreign_schema(path: &str, type_name: &str) -> ValueError {
    ValueError::invalid_argument(
        path,
        format!("{} instance was built from a different schema", type_name),
    )
}

fn describe(value: &Value) -> String {
    match value {
        Value::Int(i) => format!("int {}", i),
        Value::Float(f) => format!("float {:?}", f),
        other => other.kind_name(),
    }
}
