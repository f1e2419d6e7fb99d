//! Observable schema lifecycle events
//!
//! Value construction and replace are not observed. Their failures are
//! returned to the caller.

use std::fmt;

use super::logger::Severity;

/// Schema lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A struct, union or enum was added to a registry under construction
    SchemaRegistered,
    /// A field name was rewritten to avoid a reserved word
    FieldRenamed,
    /// A registry left the building phase
    RegistryFrozen,
    /// A frozen registry became the process-wide registry
    RegistryInstalled,
    /// A second process-wide install was refused
    RegistryInstallRejected,
}

impl Event {
    /// Returns the event name string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SchemaRegistered => "SCHEMA_REGISTERED",
            Event::FieldRenamed => "FIELD_RENAMED",
            Event::RegistryFrozen => "REGISTRY_FROZEN",
            Event::RegistryInstalled => "REGISTRY_INSTALLED",
            Event::RegistryInstallRejected => "REGISTRY_INSTALL_REJECTED",
        }
    }

    /// Severity the event is logged at.
    pub fn severity(&self) -> Severity {
        match self {
            Event::FieldRenamed => Severity::Trace,
            Event::RegistryInstallRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
