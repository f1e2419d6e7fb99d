//! Schema registry
//!
//! Lifecycle:
//! - building: a single owner registers enums, structs and unions
//! - frozen: `freeze` turns the builder into a read-only table
//! - installed: at most one frozen table per process becomes global
//!
//! Type names share one namespace across kinds. A name can be registered
//! once; there is no update and no removal.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::config::RuntimeConfig;
use crate::instance::{StructInstance, UnionInstance};
use crate::observability::{log_event, Event};
use crate::value::{Args, ValueError, ValueResult};

use super::errors::{SchemaError, SchemaResult};
use super::naming::Sanitizer;
use super::record::{StructSchema, UnionSchema};
use super::types::EnumSchema;

static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();

/// A registered type.
#[derive(Debug, Clone)]
pub enum SchemaEntry {
    Enum(Arc<EnumSchema>),
    Struct(Arc<StructSchema>),
    Union(Arc<UnionSchema>),
}

impl SchemaEntry {
    fn kind(&self) -> &'static str {
        match self {
            SchemaEntry::Enum(_) => "enum",
            SchemaEntry::Struct(_) => "struct",
            SchemaEntry::Union(_) => "union",
        }
    }
}

/// Registry in its building phase.
pub struct RegistryBuilder {
    config: RuntimeConfig,
    sanitizer: Sanitizer,
    entries: BTreeMap<String, SchemaEntry>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` does not validate.
    pub fn new(config: RuntimeConfig) -> SchemaResult<Self> {
        Ok(Self {
            sanitizer: Sanitizer::new(&config)?,
            config,
            entries: BTreeMap::new(),
        })
    }

    /// Sanitizer configured like this registry, for building its schemas.
    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// Registers an enum type.
    pub fn register_enum(&mut self, schema: Arc<EnumSchema>) -> SchemaResult<()> {
        let name = schema.name().to_string();
        self.insert(name, SchemaEntry::Enum(schema), 0)
    }

    /// Registers a struct type.
    pub fn register_struct(&mut self, schema: Arc<StructSchema>) -> SchemaResult<()> {
        let name = schema.name().to_string();
        let fields = schema.fields().len();
        self.insert(name, SchemaEntry::Struct(schema), fields)
    }

    /// Registers a union type.
    pub fn register_union(&mut self, schema: Arc<UnionSchema>) -> SchemaResult<()> {
        let name = schema.name().to_string();
        let fields = schema.fields().len();
        self.insert(name, SchemaEntry::Union(schema), fields)
    }

    fn insert(&mut self, name: String, entry: SchemaEntry, fields: usize) -> SchemaResult<()> {
        if self.entries.contains_key(&name) {
            return Err(SchemaError::DuplicateType { type_name: name });
        }

        log_event(
            &self.config,
            Event::SchemaRegistered,
            &[
                ("type", name.as_str()),
                ("kind", entry.kind()),
                ("fields", fields.to_string().as_str()),
            ],
        );
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Ends the building phase.
    pub fn freeze(self) -> SchemaRegistry {
        log_event(
            &self.config,
            Event::RegistryFrozen,
            &[("types", self.entries.len().to_string().as_str())],
        );
        SchemaRegistry {
            config: self.config,
            entries: self.entries,
        }
    }
}

/// Frozen, read-only schema table.
#[derive(Debug)]
pub struct SchemaRegistry {
    config: RuntimeConfig,
    entries: BTreeMap<String, SchemaEntry>,
}

impl SchemaRegistry {
    /// Looks up any registered type.
    pub fn get(&self, type_name: &str) -> Option<&SchemaEntry> {
        self.entries.get(type_name)
    }

    /// Looks up a struct type.
    pub fn struct_schema(&self, type_name: &str) -> Option<&Arc<StructSchema>> {
        match self.get(type_name)? {
            SchemaEntry::Struct(schema) => Some(schema),
            _ => None,
        }
    }

    /// Looks up a union type.
    pub fn union_schema(&self, type_name: &str) -> Option<&Arc<UnionSchema>> {
        match self.get(type_name)? {
            SchemaEntry::Union(schema) => Some(schema),
            _ => None,
        }
    }

    /// Looks up an enum type.
    pub fn enum_schema(&self, type_name: &str) -> Option<&Arc<EnumSchema>> {
        match self.get(type_name)? {
            SchemaEntry::Enum(schema) => Some(schema),
            _ => None,
        }
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Constructs an instance of a registered struct type.
    pub fn construct(&self, type_name: &str, args: Args) -> ValueResult<StructInstance> {
        let schema = self
            .struct_schema(type_name)
            .ok_or_else(|| ValueError::invalid_argument(type_name, "unknown struct type"))?;
        StructInstance::new(schema, args)
    }

    /// Constructs an instance of a registered union type.
    pub fn construct_union(&self, type_name: &str, args: Args) -> ValueResult<UnionInstance> {
        let schema = self
            .union_schema(type_name)
            .ok_or_else(|| ValueError::invalid_argument(type_name, "unknown union type"))?;
        UnionInstance::new(schema, args)
    }

    /// Makes this registry the process-wide one.
    ///
    /// # Errors
    ///
    /// Returns `RegistryAlreadyInstalled` if another registry was installed
    /// earlier; the installed one is left untouched.
    pub fn install(self) -> SchemaResult<&'static SchemaRegistry> {
        let config = self.config.clone();
        let types = self.entries.len().to_string();

        match GLOBAL.set(self) {
            Ok(()) => {
                log_event(&config, Event::RegistryInstalled, &[("types", types.as_str())]);
                GLOBAL.get().ok_or(SchemaError::RegistryAlreadyInstalled)
            }
            Err(_) => {
                log_event(&config, Event::RegistryInstallRejected, &[("types", types.as_str())]);
                Err(SchemaError::RegistryAlreadyInstalled)
            }
        }
    }
}

/// The process-wide registry, if one has been installed.
pub fn global() -> Option<&'static SchemaRegistry> {
    GLOBAL.get()
}
