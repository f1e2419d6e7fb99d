//! Call arguments for construct and replace
//!
//! Fields are passed by name. Positional entries exist so that a dynamic
//! binding layer can forward what it was given verbatim; the qualifier
//! engine rejects them.

use super::value::Value;

/// What a caller supplied for one named field.
#[derive(Debug, Clone, PartialEq)]
pub enum Supplied {
    /// A concrete value, still to be validated
    Value(Value),
    /// The absence marker: "no value" for this field
    Absent,
}

impl Supplied {
    /// Wrap a concrete value.
    pub fn value(v: impl Into<Value>) -> Self {
        Supplied::Value(v.into())
    }
}

impl From<Value> for Supplied {
    fn from(v: Value) -> Self {
        Supplied::Value(v)
    }
}

impl From<Option<Value>> for Supplied {
    fn from(v: Option<Value>) -> Self {
        v.map_or(Supplied::Absent, Supplied::Value)
    }
}

/// One call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// `name=value` or `name=<absent>`
    Named { name: String, value: Supplied },
    /// A bare value with no field name
    Positional(Value),
}

/// Argument list of a construct or replace call, in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    items: Vec<Arg>,
}

impl Args {
    /// Empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name=value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, Supplied::Value(value.into()));
        self
    }

    /// Add `name=<absent>`.
    pub fn absent(mut self, name: impl Into<String>) -> Self {
        self.set(name, Supplied::Absent);
        self
    }

    /// Add a positional argument.
    pub fn positional(mut self, value: impl Into<Value>) -> Self {
        self.items.push(Arg::Positional(value.into()));
        self
    }

    /// Append a named argument in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Supplied>) {
        self.items.push(Arg::Named {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arg> {
        self.items.iter()
    }
}

impl IntoIterator for Args {
    type Item = Arg;
    type IntoIter = std::vec::IntoIter<Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<N: Into<String>, S: Into<Supplied>> FromIterator<(N, S)> for Args {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut args = Args::new();
        for (name, value) in iter {
            args.set(name, value);
        }
        args
    }
}
