//! Immutable union instances
//!
//! At most one field is active. An empty union has no active field and its
//! generic accessor reads absent. Supplying the absence marker for any
//! field, active or not, leaves the union empty.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::schema::{FieldSpec, UnionSchema};
use crate::value::{canonical_cmp, Args, HashKey, Value, ValueError, ValueResult};

use super::qualifier::resolve_union;

/// An instance of a union type.
#[derive(Clone)]
pub struct UnionInstance {
    schema: Arc<UnionSchema>,
    active: Option<Arc<(usize, Value)>>,
}

impl UnionInstance {
    /// Construct from at most one keyword argument.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if more than one field is supplied, plus every
    /// error the field's validator raises.
    pub fn new(schema: &Arc<UnionSchema>, args: Args) -> ValueResult<Self> {
        let active = resolve_union(schema, None, args)?;
        Ok(Self {
            schema: Arc::clone(schema),
            active: active.map(Arc::new),
        })
    }

    /// A union with no active field.
    pub fn empty(schema: &Arc<UnionSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            active: None,
        }
    }

    /// Return a new instance; a supplied field replaces the active one.
    ///
    /// An absent marker clears the union whichever field it names.
    pub fn replace(&self, args: Args) -> ValueResult<Self> {
        let active = resolve_union(&self.schema, self.active.as_deref(), args)?;
        Ok(Self {
            schema: Arc::clone(&self.schema),
            active: active.map(Arc::new),
        })
    }

    pub fn schema(&self) -> &Arc<UnionSchema> {
        &self.schema
    }

    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    /// The active value, or `None` for an empty union.
    pub fn value(&self) -> Option<&Value> {
        self.active.as_deref().map(|(_, v)| v)
    }

    /// The active field.
    pub fn active_field(&self) -> Option<&FieldSpec> {
        self.active
            .as_deref()
            .map(|(idx, _)| &self.schema.fields()[*idx])
    }

    /// Wire id of the active field.
    pub fn active_id(&self) -> Option<u16> {
        self.active_field().map(FieldSpec::id)
    }

    /// Read a field by external name; inactive fields read absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the type has no field with that name.
    pub fn get(&self, name: &str) -> ValueResult<Option<&Value>> {
        let idx = self.schema.position(name).ok_or_else(|| {
            ValueError::invalid_argument(self.type_name(), format!("unknown field '{}'", name))
        })?;
        Ok(self
            .active
            .as_deref()
            .filter(|(active, _)| *active == idx)
            .map(|(_, v)| v))
    }

    /// Canonical hashable projection.
    pub fn hash_key(&self) -> HashKey<'_> {
        match self.active.as_deref() {
            Some((idx, value)) => {
                HashKey::Variant(self.type_name(), Some(*idx), Box::new(value.hash_key()))
            }
            None => HashKey::Variant(self.type_name(), None, Box::new(HashKey::Absent)),
        }
    }

    /// Type name, then active position (empty first), then payload.
    pub(crate) fn structural_cmp(&self, other: &Self) -> Ordering {
        self.type_name()
            .cmp(other.type_name())
            .then_with(|| match (self.active.as_deref(), other.active.as_deref()) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some((ai, av)), Some((bi, bv))) => ai.cmp(bi).then_with(|| canonical_cmp(av, bv)),
            })
    }

    /// Order two union instances.
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

impl PartialEq for UnionInstance {
    fn eq(&self, other: &Self) -> bool {
        self.structural_cmp(other) == Ordering::Equal
    }
}

impl Eq for UnionInstance {}

impl Hash for UnionInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_key().hash(state);
    }
}

impl fmt::Debug for UnionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut t = f.debug_tuple(self.type_name());
        if let (Some(field), Some(value)) = (self.active_field(), self.value()) {
            t.field(&format_args!("{}={:?}", field.external_name(), value));
        }
        t.finish()
    }
}

impl fmt::Display for UnionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.active_field(), self.value()) {
            (Some(field), Some(value)) => {
                write!(f, "{}({}={})", self.type_name(), field.external_name(), value)
            }
            _ => write!(f, "{}()", self.type_name()),
        }
    }
}
