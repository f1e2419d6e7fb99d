//! Struct and Union Semantics Tests
//!
//! Construction, replace, equality, hashing and ordering of instances:
//! - Omitted fields take their schema default, or stay absent
//! - The absence marker resets Unqualified fields and fails Required ones
//! - Replace never touches the original instance
//! - Equal instances hash equally, list fields included
//! - Ordering is field by field, absent first, and only for orderable types

mod common;

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use common::fixtures;
use idlvalue::instance::{sort_instances, StructInstance, UnionInstance};
use idlvalue::schema::{FieldDecl, StructSchema, TypeTag};
use idlvalue::value::{Args, Value, ValueErrorKind};

fn hash_of<T: Hash>(v: &T) -> u64 {
    let mut h = DefaultHasher::new();
    v.hash(&mut h);
    h.finish()
}

fn text(s: &str) -> Value {
    Value::from(s)
}

// =============================================================================
// Construction Tests
// =============================================================================

/// Omitted Unqualified fields read their default.
#[test]
fn test_unqualified_defaults() {
    let f = fixtures();
    let x = StructInstance::new(&f.easy, Args::new()).unwrap();

    assert_eq!(x.get("val").unwrap(), Some(&Value::Int(0)));
    assert_eq!(x.get("val_list").unwrap(), Some(&Value::List(vec![])));
    assert_eq!(x.get("name").unwrap(), None);

    let an_int = x.get("an_int").unwrap().and_then(Value::as_union).unwrap();
    assert_eq!(an_int.value(), None);
}

/// Omitted fields with a schema default read that default.
#[test]
fn test_required_with_defaults() {
    let f = fixtures();
    let re = StructInstance::new(&f.easy, Args::new().with("val", 10)).unwrap();
    let x = StructInstance::new(&f.mixed, Args::new().with("req_easy_ref", re.clone())).unwrap();

    assert_eq!(x.get("opt_field").unwrap(), Some(&text("optional")));
    assert_eq!(x.get("req_field").unwrap(), Some(&text("required")));
    assert_eq!(x.get("unq_field").unwrap(), Some(&text("unqualified")));
    assert_eq!(x.get("opt_easy_ref").unwrap(), None);
    assert_eq!(x.get("req_easy_ref").unwrap(), Some(&Value::Struct(re)));
}

/// Required fields without a default must be supplied.
#[test]
fn test_required_without_default_missing() {
    let f = fixtures();
    let err = StructInstance::new(&f.hard, Args::new().with("name", "x")).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::RequiredFieldMissing);
    assert!(err.to_string().contains("hard.an_int"));

    let err = StructInstance::new(&f.mixed, Args::new()).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::RequiredFieldMissing);
}

/// Absence marker for a Required field fails even if it has a default.
#[test]
fn test_required_absent_rejected() {
    let f = fixtures();
    let re = StructInstance::new(&f.easy, Args::new()).unwrap();
    let err = StructInstance::new(
        &f.mixed,
        Args::new().with("req_easy_ref", re).absent("req_field"),
    )
    .unwrap_err();
    assert_eq!(err.code(), "IDL_REQUIRED_FIELD_MISSING");
}

/// Positional and unknown arguments are rejected.
#[test]
fn test_keyword_only() {
    let f = fixtures();

    let err = StructInstance::new(&f.easy, Args::new().positional(1)).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::InvalidArgument);

    let err = StructInstance::new(&f.easy, Args::new().with("bogus", 1)).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::InvalidArgument);
}

/// Field values are checked against their declared type.
#[test]
fn test_runtime_type_checks() {
    let f = fixtures();
    let x = StructInstance::new(&f.runtime, Args::new()).unwrap();

    assert!(StructInstance::new(&f.runtime, Args::new().with("bool_val", 5)).is_err());
    assert!(x.replace(Args::new().with("bool_val", 5)).is_err());
    assert!(x.replace(Args::new().with("enum_val", 2)).is_err());
    assert!(x.replace(Args::new().with("int_list_val", vec!["foo", "bar"])).is_err());

    let blue = f.color.member("blue").unwrap();
    let y = x.replace(Args::new().with("enum_val", blue.clone())).unwrap();
    assert_eq!(y.get("enum_val").unwrap(), Some(&Value::Enum(blue)));

    let red = x.get("enum_val").unwrap().and_then(Value::as_enum).unwrap();
    assert_eq!(red.name(), "red");
}

/// A nested instance of the wrong type is rejected.
#[test]
fn test_nested_type_checked() {
    let f = fixtures();
    let wrong = StructInstance::new(&f.optionals, Args::new()).unwrap();
    let err = StructInstance::new(&f.mixed, Args::new().with("req_easy_ref", wrong)).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::InvalidArgument);
    assert!(err.to_string().contains("mixed.req_easy_ref"));
}

/// Optional list fields read absent until set.
#[test]
fn test_optional_list() {
    let f = fixtures();
    let x = StructInstance::new(&f.optionals, Args::new()).unwrap();
    assert!(!x.is_set("values"));

    let y = x.replace(Args::new().with("values", vec!["a", "b"])).unwrap();
    assert_eq!(
        y.get("values").unwrap().and_then(Value::as_list),
        Some(&[text("a"), text("b")][..])
    );
}

// =============================================================================
// Replace Tests
// =============================================================================

/// Replace yields an independent instance.
#[test]
fn test_replace_is_independent() {
    let f = fixtures();
    let x = StructInstance::new(
        &f.easy,
        Args::new().with("val", 1).with("val_list", vec![1, 2, 3]),
    )
    .unwrap();
    let y = x.replace(Args::new().with("val_list", vec![4])).unwrap();

    assert_eq!(x.get("val_list").unwrap(), Some(&Value::list([1, 2, 3])));
    assert_eq!(y.get("val_list").unwrap(), Some(&Value::list([4])));
    assert_eq!(y.get("val").unwrap(), Some(&Value::Int(1)));

    let z = x.replace(Args::new()).unwrap();
    assert_eq!(z, x);
}

/// The absence marker resets Unqualified fields to their default.
#[test]
fn test_absent_restores_default() {
    let f = fixtures();
    let x = StructInstance::new(
        &f.hard,
        Args::new()
            .with("val", 1)
            .with("val_list", vec![1, 2])
            .with("name", "something")
            .with(
                "an_int",
                UnionInstance::new(&f.integers, Args::new().with("small", 1)).unwrap(),
            )
            .with("other", "non default"),
    )
    .unwrap();

    let y = x.replace(Args::new().absent("other")).unwrap();
    assert_eq!(y.get("other").unwrap(), Some(&text("some default")));
    assert_eq!(x.get("other").unwrap(), Some(&text("non default")));

    let err = x.replace(Args::new().absent("name")).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::RequiredFieldMissing);
}

/// Optional fields cleared by replace read absent.
#[test]
fn test_replace_clears_optional() {
    let f = fixtures();
    let re = StructInstance::new(&f.easy, Args::new().with("val", 10)).unwrap();
    let e = StructInstance::new(&f.easy, Args::new().with("val", 5)).unwrap();

    let x = StructInstance::new(&f.mixed, Args::new().with("req_easy_ref", re.clone())).unwrap();
    let z = x.replace(Args::new().with("opt_easy_ref", e.clone())).unwrap();
    assert_eq!(z.get("opt_easy_ref").unwrap(), Some(&Value::Struct(e)));
    assert_ne!(x, z);

    let y = z.replace(Args::new().absent("opt_easy_ref")).unwrap();
    assert_eq!(y.get("opt_easy_ref").unwrap(), None);
    assert_eq!(y, x);

    let err = z.replace(Args::new().absent("req_easy_ref")).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::RequiredFieldMissing);
}

/// A failed replace leaves nothing half-applied.
#[test]
fn test_failed_replace_is_atomic() {
    let f = fixtures();
    let x = StructInstance::new(&f.easy, Args::new().with("val", 1)).unwrap();
    let result = x.replace(Args::new().with("name", "n").with("val", 1i64 << 40));
    assert_eq!(result.unwrap_err().kind(), ValueErrorKind::NumericOverflow);
    assert_eq!(x.get("name").unwrap(), None);
    assert_eq!(x.get("val").unwrap(), Some(&Value::Int(1)));
}

// =============================================================================
// Equality and Hashing Tests
// =============================================================================

/// Instances with list fields hash, and equal instances hash equally.
#[test]
fn test_hashable_with_lists() {
    let f = fixtures();
    let a = StructInstance::new(&f.easy, Args::new().with("val_list", vec![1, 2])).unwrap();
    let b = StructInstance::new(&f.easy, Args::new().with("val_list", vec![1, 2])).unwrap();
    let c = StructInstance::new(&f.easy, Args::new().with("val_list", vec![2, 1])).unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_ne!(a, c);

    let set: HashSet<StructInstance> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

/// Set and map fields compare independent of insertion order.
#[test]
fn test_set_and_map_fields() {
    let schema = StructSchema::builder("Tags")
        .field(FieldDecl::unqualified(1, "tags", TypeTag::set(TypeTag::Text)))
        .field(FieldDecl::unqualified(
            2,
            "weights",
            TypeTag::map(TypeTag::Text, TypeTag::Float64),
        ))
        .build_with(&common::sanitizer())
        .unwrap();

    let a = StructInstance::new(
        &schema,
        Args::new()
            .with("tags", Value::set(["b", "a"]))
            .with("weights", Value::map([("x", 1), ("y", 2)])),
    )
    .unwrap();
    let b = StructInstance::new(
        &schema,
        Args::new()
            .with("tags", vec!["a", "b", "a"])
            .with("weights", Value::map([("y", 2.0), ("x", 1.0)])),
    )
    .unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
    assert_eq!(a.hash_key(), b.hash_key());
}

/// Different types never compare equal, even with identical field values.
#[test]
fn test_type_is_part_of_identity() {
    let a = StructSchema::builder("A")
        .field(FieldDecl::unqualified(1, "x", TypeTag::Int32))
        .build_with(&common::sanitizer())
        .unwrap();
    let b = StructSchema::builder("B")
        .field(FieldDecl::unqualified(1, "x", TypeTag::Int32))
        .build_with(&common::sanitizer())
        .unwrap();

    let x = StructInstance::new(&a, Args::new()).unwrap();
    let y = StructInstance::new(&b, Args::new()).unwrap();
    assert_ne!(x, y);
    assert_eq!(x.try_cmp(&y).unwrap_err().kind(), ValueErrorKind::InvalidArgument);
}

// =============================================================================
// Ordering Tests
// =============================================================================

/// Orderable instances sort field by field in declaration order.
#[test]
fn test_sort_orderable() {
    let f = fixtures();
    let make = |val: i32, name: Option<&str>| {
        let mut args = Args::new().with("val", val);
        if let Some(name) = name {
            args.set("name", text(name));
        }
        StructInstance::new(&f.easy, args).unwrap()
    };

    let mut items = vec![
        make(2, Some("a")),
        make(1, Some("b")),
        make(1, None),
        make(1, Some("a")),
    ];
    sort_instances(&mut items).unwrap();

    assert_eq!(
        items,
        vec![
            make(1, None),
            make(1, Some("a")),
            make(1, Some("b")),
            make(2, Some("a")),
        ]
    );
    assert_eq!(items[0].try_cmp(&items[1]).unwrap(), Ordering::Less);
    assert_eq!(items[3].try_cmp(&items[3].clone()).unwrap(), Ordering::Equal);
}

/// Non-comparable types hash and compare equal but refuse ordering.
#[test]
fn test_noncomparable() {
    let f = fixtures();
    let a = StructInstance::new(&f.slow_compare, Args::new().with("field1", "text")).unwrap();
    let b = StructInstance::new(&f.slow_compare, Args::new().with("field1", "text")).unwrap();

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let err = a.try_cmp(&b).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::UnsupportedOperation);

    let mut items = vec![a, b];
    assert_eq!(
        sort_instances(&mut items).unwrap_err().code(),
        "IDL_UNSUPPORTED_OPERATION"
    );
}

// =============================================================================
// Union Tests
// =============================================================================

/// Empty unions read absent; set then cleared reads absent again.
#[test]
fn test_union_lifecycle() {
    let f = fixtures();
    let empty = UnionInstance::new(&f.integers, Args::new()).unwrap();
    assert_eq!(empty.value(), None);

    let set = empty.replace(Args::new().with("medium", 70_000)).unwrap();
    assert_eq!(set.value(), Some(&Value::Int(70_000)));
    assert_eq!(set.active_id(), Some(3));

    let cleared = set.replace(Args::new().absent("medium")).unwrap();
    assert_eq!(cleared.value(), None);
    assert_eq!(cleared, empty);
    assert_eq!(hash_of(&cleared), hash_of(&empty));
}

/// At most one union field may be supplied.
#[test]
fn test_union_single_field() {
    let f = fixtures();
    let err = UnionInstance::new(&f.integers, Args::new().with("tiny", 1).with("large", 2))
        .unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::InvalidArgument);

    let err = UnionInstance::new(&f.integers, Args::new().with("small", 1 << 20)).unwrap_err();
    assert_eq!(err.kind(), ValueErrorKind::NumericOverflow);
}

// =============================================================================
// Naming Tests
// =============================================================================

/// Reserved-word fields are reachable through their external names.
#[test]
fn test_reserved_names() {
    let f = fixtures();
    let x = StructInstance::new(
        &f.reserved,
        Args::new()
            .with("from_", "hello")
            .with("nonlocal_", 3)
            .with("ok", "other")
            .with("is_cpdef", true),
    )
    .unwrap();

    assert_eq!(x.get("from_").unwrap(), Some(&text("hello")));
    assert_eq!(x.get("nonlocal_").unwrap(), Some(&Value::Int(3)));
    assert_eq!(x.get("ok").unwrap(), Some(&text("other")));
    assert_eq!(x.get("is_cpdef").unwrap(), Some(&Value::Bool(true)));
    assert!(x.get("from").is_err());

    let field = f.reserved.field("from_").unwrap();
    assert_eq!(field.canonical_name(), "from");
    assert_eq!(field.id(), 1);
    assert_eq!(x.get_by_id(1), Some(&text("hello")));
}

/// Display renders fields in declaration order with external names.
#[test]
fn test_display() {
    let f = fixtures();
    let x = StructInstance::new(&f.reserved, Args::new().with("from_", "a").with("ok", "b"))
        .unwrap();
    assert_eq!(
        x.to_string(),
        "Reserved(from_=\"a\", nonlocal_=<absent>, ok=\"b\", is_cpdef=<absent>)"
    );
}
