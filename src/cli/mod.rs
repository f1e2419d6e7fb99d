//! CLI module for idlvalue
//!
//! Provides command-line interface for:
//! - check-config: validate a runtime configuration file
//! - sanitize: show the external names assigned to field names

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, load_config, run, run_command, sanitize};
pub use errors::{CliError, CliResult};
