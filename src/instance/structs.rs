//! Immutable struct instances
//!
//! Storage is one slot per declared field, in declaration order, behind an
//! `Arc`. An instance never changes after construction; `replace` resolves
//! a fresh slot vector and wraps it in a new instance.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::schema::{FieldSpec, StructSchema};
use crate::value::{slot_cmp, slot_key, Args, HashKey, Value, ValueError, ValueResult};

use super::qualifier::{resolve_struct, Baseline};

/// An instance of a struct type.
#[derive(Clone)]
pub struct StructInstance {
    schema: Arc<StructSchema>,
    values: Arc<[Option<Value>]>,
}

impl StructInstance {
    /// Construct an instance from keyword arguments.
    ///
    /// Fields not named take their schema default (or stay absent if they
    /// have none).
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for positional or unknown arguments and type
    ///   mismatches
    /// - `NumericOverflow` for integral values outside the field width
    /// - `RequiredFieldMissing` if a Required field ends up absent
    pub fn new(schema: &Arc<StructSchema>, args: Args) -> ValueResult<Self> {
        let values = resolve_struct(schema, Baseline::Defaults, args)?;
        Ok(Self {
            schema: Arc::clone(schema),
            values: values.into(),
        })
    }

    /// Return a new instance with the named fields changed.
    ///
    /// Fields not named keep their current value. `self` is untouched, and
    /// the result shares no mutable state with it.
    pub fn replace(&self, args: Args) -> ValueResult<Self> {
        let values = resolve_struct(&self.schema, Baseline::Current(&self.values), args)?;
        Ok(Self {
            schema: Arc::clone(&self.schema),
            values: values.into(),
        })
    }

    pub fn schema(&self) -> &Arc<StructSchema> {
        &self.schema
    }

    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    /// Read a field by external name; `Ok(None)` means absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the type has no field with that name.
    pub fn get(&self, name: &str) -> ValueResult<Option<&Value>> {
        let idx = self.schema.position(name).ok_or_else(|| {
            ValueError::invalid_argument(self.type_name(), format!("unknown field '{}'", name))
        })?;
        Ok(self.values[idx].as_ref())
    }

    /// Read a field by wire id.
    pub fn get_by_id(&self, id: u16) -> Option<&Value> {
        let idx = self.schema.position_of_id(id)?;
        self.values[idx].as_ref()
    }

    /// Whether the named field holds a value.
    pub fn is_set(&self, name: &str) -> bool {
        matches!(self.get(name), Ok(Some(_)))
    }

    /// `(field, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldSpec, Option<&Value>)> {
        self.schema
            .fields()
            .iter()
            .zip(self.values.iter().map(Option::as_ref))
    }

    /// Canonical hashable projection.
    pub fn hash_key(&self) -> HashKey<'_> {
        HashKey::Record(
            self.type_name(),
            self.values.iter().map(|v| slot_key(v.as_ref())).collect(),
        )
    }

    /// Type name first, then field count, then fields in declaration order.
    pub(crate) fn structural_cmp(&self, other: &Self) -> Ordering {
        self.type_name()
            .cmp(other.type_name())
            .then_with(|| self.values.len().cmp(&other.values.len()))
            .then_with(|| {
                self.values
                    .iter()
                    .zip(other.values.iter())
                    .map(|(a, b)| slot_cmp(a.as_ref(), b.as_ref()))
                    .find(|ord| *ord != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// Order two instances field by field.
    ///
    /// # Errors
    ///
    /// - `UnsupportedOperation` if the type is not orderable
    /// - `InvalidArgument` if `other` is of a different type
    pub fn try_cmp(&self, other: &Self) -> ValueResult<Ordering> {
        if !self.schema.is_orderable() {
            return Err(ValueError::unsupported(self.type_name(), "ordering"));
        }
        if self.type_name() != other.type_name() {
            return Err(ValueError::type_mismatch(
                self.type_name(),
                self.type_name(),
                other.type_name(),
            ));
        }
        Ok(self.structural_cmp(other))
    }
}

/// Sort instances of one orderable struct type in place.
///
/// # Errors
///
/// Fails like [`StructInstance::try_cmp`]; the slice is left unchanged.
pub fn sort_instances(items: &mut [StructInstance]) -> ValueResult<()> {
    if let Some(first) = items.first() {
        for item in items.iter() {
            first.try_cmp(item)?;
        }
    }
    items.sort_by(StructInstance::structural_cmp);
    Ok(())
}

impl PartialEq for StructInstance {
    fn eq(&self, other: &Self) -> bool {
        self.structural_cmp(other) == Ordering::Equal
    }
}

impl Eq for StructInstance {}

impl Hash for StructInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

impl fmt::Debug for StructInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.type_name());
        for (field, value) in self.iter() {
            s.field(field.external_name(), &value);
        }
        s.finish()
    }
}

impl fmt::Display for StructInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name())?;
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(v) => write!(f, "{}={}", field.external_name(), v)?,
                None => write!(f, "{}=<absent>", field.external_name())?,
            }
        }
        write!(f, ")")
    }
}
