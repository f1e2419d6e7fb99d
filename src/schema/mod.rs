//! Schema subsystem
//!
//! Descriptors for struct, union and enum types, the builders that check
//! them once, the identifier sanitizer, and the process-wide registry.
//!
//! # Design Principles
//!
//! - Schemas are checked when built, never patched afterwards
//! - Built schemas are immutable and shared behind `Arc`
//! - Declaration order is the canonical field order
//! - Registration is write-once; the registry is frozen before use

mod errors;
mod naming;
mod record;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use naming::{Sanitizer, PYTHON_KEYWORDS, RUNTIME_NAMES, RUST_KEYWORDS};
pub use record::{
    FieldDecl, FieldSpec, Qualifier, StructSchema, StructSchemaBuilder, UnionSchema,
    UnionSchemaBuilder,
};
pub use registry::{global, RegistryBuilder, SchemaEntry, SchemaRegistry};
pub use types::{bit_range, is_orderable, EnumSchema, EnumValue, IntWidth, TypeTag};
