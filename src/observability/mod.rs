//! Observability for schema lifecycle
//!
//! Structured, deterministic JSON-line logging of the events that shape the
//! process-wide schema table: registration, field renames, freeze, install.
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on schema or value semantics
//! 3. No background threads
//! 4. Deterministic output

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

use crate::config::RuntimeConfig;

/// Log a lifecycle event if `config` allows it.
pub fn log_event(config: &RuntimeConfig, event: Event, fields: &[(&str, &str)]) {
    let severity = event.severity();
    if config.should_log(severity) {
        Logger::log(severity, event.as_str(), fields);
    }
}
