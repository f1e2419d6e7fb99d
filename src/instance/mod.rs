//! Instance subsystem
//!
//! Immutable struct and union instances and the qualifier engine that
//! builds them.
//!
//! # Design Principles
//!
//! - Construct and replace share one resolution path
//! - Every failure aborts the call; no partial instance is returned
//! - Equality and hashing always work; ordering only for orderable types
//! - Instances are `Send + Sync` and never mutated

mod qualifier;
mod structs;
mod union;

pub use structs::{sort_instances, StructInstance};
pub use union::UnionInstance;
