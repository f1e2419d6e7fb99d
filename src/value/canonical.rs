//! Canonical projection and total order over values
//!
//! Hashing never touches the containers directly. Every value is first
//! projected to a [`HashKey`], an immutable tuple-like tree in which lists,
//! sets and maps become ordered sequences and floats become their bit
//! patterns. Equality, hashing and ordering all agree with this projection:
//! - floats compare by `f64::total_cmp`, so `NaN == NaN` and `-0.0 != 0.0`
//! - absent fields sort before present ones
//! - values of different kinds order by kind rank

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::value::Value;

/// Hashable, borrowed projection of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey<'a> {
    /// An unset field
    Absent,
    Bool(bool),
    Int(i128),
    /// IEEE 754 bit pattern
    Float(u64),
    Text(&'a str),
    Binary(&'a [u8]),
    Enum(&'a str, i32),
    List(Vec<HashKey<'a>>),
    Set(Vec<HashKey<'a>>),
    Map(Vec<(HashKey<'a>, HashKey<'a>)>),
    /// Struct type name and its fields in declaration order
    Record(&'a str, Vec<HashKey<'a>>),
    /// Union type name, active field position and payload
    Variant(&'a str, Option<usize>, Box<HashKey<'a>>),
}

impl Value {
    /// Project this value to its canonical hashable form.
    pub fn hash_key(&self) -> HashKey<'_> {
        match self {
            Value::Bool(b) => HashKey::Bool(*b),
            Value::Int(i) => HashKey::Int(*i),
            Value::Float(f) => HashKey::Float(f.to_bits()),
            Value::Text(s) => HashKey::Text(s),
            Value::Binary(b) => HashKey::Binary(b),
            Value::Enum(e) => HashKey::Enum(e.enum_name(), e.ordinal()),
            Value::List(items) => HashKey::List(items.iter().map(Value::hash_key).collect()),
            Value::Set(items) => HashKey::Set(items.iter().map(Value::hash_key).collect()),
            Value::Map(entries) => HashKey::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.hash_key(), v.hash_key()))
                    .collect(),
            ),
            Value::Struct(s) => s.hash_key(),
            Value::Union(u) => u.hash_key(),
        }
    }
}

/// Projection of an optional field slot.
pub(crate) fn slot_key(slot: Option<&Value>) -> HashKey<'_> {
    slot.map_or(HashKey::Absent, Value::hash_key)
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Bool(_) => 0,
        Value::Int(_) => 1,
        Value::Float(_) => 2,
        Value::Text(_) => 3,
        Value::Binary(_) => 4,
        Value::Enum(_) => 5,
        Value::List(_) => 6,
        Value::Set(_) => 7,
        Value::Map(_) => 8,
        Value::Struct(_) => 9,
        Value::Union(_) => 10,
    }
}

/// Total structural order over values.
///
/// Used to canonicalize sets and maps and to order instances of orderable
/// types. Callers that expose ordering to users must check orderability
/// first.
pub fn canonical_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        (Value::Binary(x), Value::Binary(y)) => x.cmp(y),
        (Value::Enum(x), Value::Enum(y)) => x
            .enum_name()
            .cmp(y.enum_name())
            .then(x.ordinal().cmp(&y.ordinal())),
        (Value::List(x), Value::List(y)) | (Value::Set(x), Value::Set(y)) => cmp_seq(x, y),
        (Value::Map(x), Value::Map(y)) => {
            for ((xk, xv), (yk, yv)) in x.iter().zip(y.iter()) {
                let ord = canonical_cmp(xk, yk).then_with(|| canonical_cmp(xv, yv));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Value::Struct(x), Value::Struct(y)) => x.structural_cmp(y),
        (Value::Union(x), Value::Union(y)) => x.structural_cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

/// Order two optional field slots; absent sorts first.
pub(crate) fn slot_cmp(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => canonical_cmp(x, y),
    }
}

fn cmp_seq(x: &[Value], y: &[Value]) -> Ordering {
    for (a, b) in x.iter().zip(y.iter()) {
        let ord = canonical_cmp(a, b);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    x.len().cmp(&y.len())
}

/// Sort set elements and drop duplicates.
pub(crate) fn canonicalize_set(mut items: Vec<Value>) -> Vec<Value> {
    items.sort_by(canonical_cmp);
    items.dedup_by(|a, b| canonical_cmp(a, b) == Ordering::Equal);
    items
}

/// Sort map entries by key; for repeated keys the last supplied entry wins.
pub(crate) fn canonicalize_map(mut entries: Vec<(Value, Value)>) -> Vec<(Value, Value)> {
    entries.reverse();
    // stable: the first of each run of equal keys is the last one supplied
    entries.sort_by(|a, b| canonical_cmp(&a.0, &b.0));
    entries.dedup_by(|a, b| canonical_cmp(&a.0, &b.0) == Ordering::Equal);
    entries
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        canonical_cmp(self, other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(v: &T) -> u64 {
        let mut h = DefaultHasher::new();
        v.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_list_values_hash() {
        let a = Value::list([1, 2, 3]);
        let b = Value::list([1, 2, 3]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, Value::list([1, 2]));
    }

    #[test]
    fn test_list_and_set_are_distinct() {
        let list = Value::list([1]);
        let set = Value::set([1]);
        assert_ne!(list, set);
        assert_ne!(list.hash_key(), set.hash_key());
    }

    #[test]
    fn test_float_equality_by_bits() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
        assert_eq!(
            hash_of(&Value::Float(1.5)),
            hash_of(&Value::Float(1.5))
        );
    }

    #[test]
    fn test_kind_rank_orders_mixed_kinds() {
        assert_eq!(
            canonical_cmp(&Value::Bool(true), &Value::Int(0)),
            Ordering::Less
        );
        assert_eq!(
            canonical_cmp(&Value::from("a"), &Value::Int(100)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_sequence_order_is_lexicographic() {
        assert_eq!(
            canonical_cmp(&Value::list([1, 2]), &Value::list([1, 3])),
            Ordering::Less
        );
        assert_eq!(
            canonical_cmp(&Value::list([1, 2]), &Value::list([1, 2, 0])),
            Ordering::Less
        );
        assert_eq!(
            canonical_cmp(&Value::list([2]), &Value::list([1, 9, 9])),
            Ordering::Greater
        );
    }

    #[test]
    fn test_absent_slot_sorts_first() {
        let one = Value::Int(1);
        assert_eq!(slot_cmp(None, Some(&one)), Ordering::Less);
        assert_eq!(slot_cmp(Some(&one), None), Ordering::Greater);
        assert_eq!(slot_cmp(None, None), Ordering::Equal);
        assert_eq!(slot_key(None), HashKey::Absent);
    }

    #[test]
    fn test_map_key_order_independent() {
        let a = Value::map([("x", 1), ("y", 2)]);
        let b = Value::map([("y", 2), ("x", 1)]);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }
}
