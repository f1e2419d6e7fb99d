//! Schema build and registry errors
//!
//! Error codes:
//! - IDL_SCHEMA_DUPLICATE_FIELD_ID
//! - IDL_SCHEMA_DUPLICATE_FIELD_NAME
//! - IDL_SCHEMA_INVALID_DEFAULT
//! - IDL_SCHEMA_INVALID_UNION_FIELD
//! - IDL_SCHEMA_DUPLICATE_TYPE
//! - IDL_SCHEMA_INVALID_CONFIG
//! - IDL_REGISTRY_ALREADY_INSTALLED
//!
//! These are raised while schemas are assembled, never while values are
//! constructed. Value failures use [`crate::value::ValueError`].

use thiserror::Error;

use crate::value::ValueError;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while assembling schemas or the registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("{type_name}: field id {id} declared more than once")]
    DuplicateFieldId { type_name: String, id: u16 },

    #[error("{type_name}: field name '{name}' declared more than once")]
    DuplicateFieldName { type_name: String, name: String },

    #[error("{type_name}.{field}: default value rejected: {source}")]
    InvalidDefault {
        type_name: String,
        field: String,
        #[source]
        source: ValueError,
    },

    #[error("{type_name}.{field}: invalid union field: {reason}")]
    InvalidUnionField {
        type_name: String,
        field: String,
        reason: String,
    },

    #[error("type '{type_name}' is already registered")]
    DuplicateType { type_name: String },

    #[error("invalid runtime configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("a schema registry is already installed for this process")]
    RegistryAlreadyInstalled,
}

impl SchemaError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::DuplicateFieldId { .. } => "IDL_SCHEMA_DUPLICATE_FIELD_ID",
            SchemaError::DuplicateFieldName { .. } => "IDL_SCHEMA_DUPLICATE_FIELD_NAME",
            SchemaError::InvalidDefault { .. } => "IDL_SCHEMA_INVALID_DEFAULT",
            SchemaError::InvalidUnionField { .. } => "IDL_SCHEMA_INVALID_UNION_FIELD",
            SchemaError::DuplicateType { .. } => "IDL_SCHEMA_DUPLICATE_TYPE",
            SchemaError::InvalidConfig { .. } => "IDL_SCHEMA_INVALID_CONFIG",
            SchemaError::RegistryAlreadyInstalled => "IDL_REGISTRY_ALREADY_INSTALLED",
        }
    }
}
