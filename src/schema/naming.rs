//! Identifier sanitizer
//!
//! Every field has a canonical (wire) name and an external (host-safe)
//! name. A canonical name that is a reserved word in one of the generated
//! bindings' host languages, or that shadows a name the instance machinery
//! uses itself, gets the rename marker appended.
//!
//! Assignment is injective per schema. Names that need no rewrite claim
//! themselves first; rewritten names keep appending the marker until they
//! hit a free name. Field id and canonical name are never touched.

use std::collections::HashSet;

use crate::config::RuntimeConfig;
use crate::observability::{log_event, Event};

use super::errors::SchemaResult;

/// Rust keywords, strict and reserved.
pub const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Python keywords and soft keywords.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "match", "case",
];

/// Names the instance accessors and helpers use themselves.
pub const RUNTIME_NAMES: &[&str] = &[
    "get", "get_by_id", "is_set", "iter", "replace", "schema", "type_name", "try_cmp",
    "hash_key", "value", "active_field", "active_id",
];

/// Maps canonical field names to external names.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    marker: String,
    reserved: HashSet<String>,
    config: RuntimeConfig,
}

impl Sanitizer {
    /// Create a sanitizer from runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `config` does not validate; an empty
    /// marker could never produce a free name.
    pub fn new(config: &RuntimeConfig) -> SchemaResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: &RuntimeConfig) -> Self {
        let reserved = RUST_KEYWORDS
            .iter()
            .chain(PYTHON_KEYWORDS)
            .chain(RUNTIME_NAMES)
            .map(|w| w.to_string())
            .chain(config.extra_reserved.iter().cloned())
            .collect();

        Self {
            marker: config.rename_marker.clone(),
            reserved,
            config: config.clone(),
        }
    }

    /// Returns the rename marker.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns true if `name` may not be used as an external name.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// External name for a single canonical name, ignoring other fields.
    pub fn canonical_to_external(&self, name: &str) -> String {
        let mut candidate = name.to_string();
        while self.is_reserved(&candidate) {
            candidate.push_str(&self.marker);
        }
        candidate
    }

    /// Assign injective external names to one schema's fields.
    ///
    /// `canonical` must not contain duplicates; the schema builder checks
    /// that before calling.
    pub fn assign(&self, type_name: &str, canonical: &[&str]) -> Vec<String> {
        let mut taken: HashSet<String> = canonical
            .iter()
            .filter(|name| !self.is_reserved(name))
            .map(|name| name.to_string())
            .collect();

        canonical
            .iter()
            .map(|name| {
                if !self.is_reserved(name) {
                    return name.to_string();
                }

                let mut candidate = format!("{}{}", name, self.marker);
                while self.is_reserved(&candidate) || taken.contains(&candidate) {
                    candidate.push_str(&self.marker);
                }
                taken.insert(candidate.clone());

                log_event(
                    &self.config,
                    Event::FieldRenamed,
                    &[
                        ("type", type_name),
                        ("canonical", *name),
                        ("external", candidate.as_str()),
                    ],
                );
                candidate
            })
            .collect()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::from_valid(&RuntimeConfig::default())
    }
}
