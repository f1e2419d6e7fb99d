//! Shared schema fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use idlvalue::config::RuntimeConfig;
use idlvalue::schema::{EnumSchema, FieldDecl, Sanitizer, StructSchema, TypeTag, UnionSchema};

pub struct Fixtures {
    pub color: Arc<EnumSchema>,
    pub integers: Arc<UnionSchema>,
    pub easy: Arc<StructSchema>,
    pub hard: Arc<StructSchema>,
    pub mixed: Arc<StructSchema>,
    pub optionals: Arc<StructSchema>,
    pub runtime: Arc<StructSchema>,
    pub slow_compare: Arc<StructSchema>,
    pub numerical: Arc<StructSchema>,
    pub reserved: Arc<StructSchema>,
}

pub fn sanitizer() -> Sanitizer {
    Sanitizer::new(&RuntimeConfig::quiet()).unwrap()
}

pub fn fixtures() -> Fixtures {
    let s = sanitizer();

    let color = EnumSchema::new("Color", [("red", 0), ("blue", 1), ("green", 2)]);

    let integers = UnionSchema::builder("Integers")
        .field(FieldDecl::optional(1, "tiny", TypeTag::Int8))
        .field(FieldDecl::optional(2, "small", TypeTag::Int16))
        .field(FieldDecl::optional(3, "medium", TypeTag::Int32))
        .field(FieldDecl::optional(4, "large", TypeTag::Int64))
        .build_with(&s)
        .unwrap();

    let easy = StructSchema::builder("easy")
        .field(FieldDecl::unqualified(1, "val", TypeTag::Int32))
        .field(FieldDecl::unqualified(2, "val_list", TypeTag::list(TypeTag::Int32)))
        .field(FieldDecl::optional(3, "name", TypeTag::Text))
        .field(FieldDecl::unqualified(4, "an_int", TypeTag::UnionRef(integers.clone())))
        .build_with(&s)
        .unwrap();

    let hard = StructSchema::builder("hard")
        .field(FieldDecl::unqualified(1, "val", TypeTag::Int32))
        .field(FieldDecl::unqualified(2, "val_list", TypeTag::list(TypeTag::Int32)))
        .field(FieldDecl::required(3, "name", TypeTag::Text))
        .field(FieldDecl::required(4, "an_int", TypeTag::UnionRef(integers.clone())))
        .field(FieldDecl::unqualified(5, "other", TypeTag::Text).with_default("some default"))
        .build_with(&s)
        .unwrap();

    let mixed = StructSchema::builder("mixed")
        .field(FieldDecl::optional(1, "opt_field", TypeTag::Text).with_default("optional"))
        .field(FieldDecl::required(2, "req_field", TypeTag::Text).with_default("required"))
        .field(FieldDecl::unqualified(3, "unq_field", TypeTag::Text).with_default("unqualified"))
        .field(FieldDecl::optional(4, "opt_easy_ref", TypeTag::StructRef(easy.clone())))
        .field(FieldDecl::required(5, "req_easy_ref", TypeTag::StructRef(easy.clone())))
        .build_with(&s)
        .unwrap();

    let optionals = StructSchema::builder("Optionals")
        .field(FieldDecl::optional(1, "values", TypeTag::list(TypeTag::Text)))
        .build_with(&s)
        .unwrap();

    let runtime = StructSchema::builder("Runtime")
        .field(FieldDecl::unqualified(1, "bool_val", TypeTag::Bool))
        .field(FieldDecl::unqualified(2, "enum_val", TypeTag::Enum(color.clone())))
        .field(FieldDecl::unqualified(3, "int_list_val", TypeTag::list(TypeTag::Int32)))
        .build_with(&s)
        .unwrap();

    let slow_compare = StructSchema::builder("SlowCompare")
        .field(FieldDecl::unqualified(1, "field1", TypeTag::Text))
        .field(FieldDecl::unqualified(2, "field2", TypeTag::Int32))
        .field(FieldDecl::unqualified(3, "field3", TypeTag::Enum(color.clone())))
        .noncomparable()
        .build_with(&s)
        .unwrap();

    let numerical = StructSchema::builder("numerical")
        .field(FieldDecl::unqualified(1, "int_val", TypeTag::Int32))
        .field(FieldDecl::unqualified(2, "float_val", TypeTag::Float64))
        .field(FieldDecl::required(3, "req_int_val", TypeTag::Int32))
        .field(FieldDecl::required(4, "req_float_val", TypeTag::Float64))
        .field(FieldDecl::unqualified(5, "i64_val", TypeTag::Int64))
        .field(FieldDecl::unqualified(6, "int_list", TypeTag::list(TypeTag::Int32)))
        .field(FieldDecl::unqualified(7, "float_list", TypeTag::list(TypeTag::Float64)))
        .build_with(&s)
        .unwrap();

    let reserved = StructSchema::builder("Reserved")
        .field(FieldDecl::optional(1, "from", TypeTag::Text))
        .field(FieldDecl::optional(2, "nonlocal", TypeTag::Int32))
        .field(FieldDecl::optional(3, "ok", TypeTag::Text))
        .field(FieldDecl::optional(4, "is_cpdef", TypeTag::Bool))
        .build_with(&s)
        .unwrap();

    Fixtures {
        color,
        integers,
        easy,
        hard,
        mixed,
        optionals,
        runtime,
        slow_compare,
        numerical,
        reserved,
    }
}
