//! Runtime configuration
//!
//! Settings that shape how schemas are assembled and how lifecycle events
//! are reported. Configured once at startup, immutable afterwards.

use serde::{Deserialize, Serialize};

use crate::observability::Severity;
use crate::schema::{SchemaError, SchemaResult};

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Marker appended to field names that collide with reserved words
    /// (default: "_")
    #[serde(default = "default_rename_marker")]
    pub rename_marker: String,

    /// Additional words treated as reserved (default: none)
    #[serde(default)]
    pub extra_reserved: Vec<String>,

    /// Whether schema lifecycle events are logged (default: true)
    #[serde(default = "default_log_events")]
    pub log_events: bool,

    /// Events below this severity are not logged (default: INFO)
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,
}

fn default_rename_marker() -> String {
    "_".to_string()
}

fn default_log_events() -> bool {
    true
}

fn default_min_severity() -> Severity {
    Severity::Info
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            rename_marker: default_rename_marker(),
            extra_reserved: Vec::new(),
            log_events: default_log_events(),
            min_severity: default_min_severity(),
        }
    }
}

impl RuntimeConfig {
    /// Create config with logging disabled.
    pub fn quiet() -> Self {
        Self {
            log_events: false,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> SchemaResult<Self> {
        let config: RuntimeConfig =
            serde_json::from_str(json).map_err(|e| SchemaError::InvalidConfig {
                reason: format!("Invalid JSON: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration itself.
    pub fn validate(&self) -> SchemaResult<()> {
        if self.rename_marker.is_empty() {
            return Err(SchemaError::InvalidConfig {
                reason: "rename_marker must not be empty".into(),
            });
        }

        // marker is appended to identifiers, so it must keep them identifiers
        if !self
            .rename_marker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(SchemaError::InvalidConfig {
                reason: format!(
                    "rename_marker '{}' contains non-identifier characters",
                    self.rename_marker
                ),
            });
        }

        Ok(())
    }

    /// Returns whether an event of `severity` should be written.
    pub fn should_log(&self, severity: Severity) -> bool {
        self.log_events && severity >= self.min_severity
    }
}
