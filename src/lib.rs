//! idlvalue - runtime for schema-defined struct and union value types
//!
//! Generated bindings describe each type with a schema; this crate turns
//! keyword arguments into immutable, validated instances:
//! - numeric coercion with exact overflow detection per integer width
//! - recursive validation of lists, sets, maps, enums and nested types
//! - Required / Optional / Unqualified field semantics
//! - functional `replace`, structural equality, hashing, optional ordering
//! - host-safe field names with an injective rename table
//! - a write-once, process-wide schema registry

pub mod cli;
pub mod config;
pub mod instance;
pub mod observability;
pub mod schema;
pub mod value;

pub use config::RuntimeConfig;
pub use instance::{sort_instances, StructInstance, UnionInstance};
pub use schema::{
    EnumSchema, EnumValue, FieldDecl, Qualifier, RegistryBuilder, SchemaError, SchemaRegistry,
    StructSchema, TypeTag, UnionSchema,
};
pub use value::{Args, Value, ValueError, ValueErrorKind};
