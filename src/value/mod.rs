//! Value model and validation
//!
//! # Design Principles
//!
//! - One closed `Value` type for everything a field can hold
//! - One recursive validator dispatched on `TypeTag`
//! - No silent truncation: floats never become integers
//! - Out-of-range integers are overflow errors, not wraparound
//! - Equality, hashing and ordering agree through a canonical projection

mod args;
mod canonical;
mod coerce;
mod errors;
mod validator;
#[allow(clippy::module_inception)]
mod value;

pub use args::{Arg, Args, Supplied};
pub use canonical::{canonical_cmp, HashKey};
pub use coerce::coerce;
pub use errors::{ValueError, ValueErrorKind, ValueResult};
pub use validator::validate;
pub use value::Value;

pub(crate) use canonical::{slot_cmp, slot_key};
pub(crate) use errors::make_path;
