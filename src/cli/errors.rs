//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints the error and exits 1.

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration rejected: {0}")]
    Config(#[from] SchemaError),

    #[error("field names rejected: {0}")]
    Fields(SchemaError),

    #[error("cannot render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Io { .. } => "IDL_CLI_IO_ERROR",
            CliError::Config(_) => "IDL_CLI_CONFIG_ERROR",
            CliError::Fields(_) => "IDL_CLI_FIELD_ERROR",
            CliError::Output(_) => "IDL_CLI_OUTPUT_ERROR",
        }
    }
}
