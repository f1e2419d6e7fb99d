//! CLI argument definitions using clap
//!
//! Commands:
//! - idlvalue check-config --config <path>
//! - idlvalue sanitize [--config <path>] <type> <name>...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// idlvalue - runtime for schema-defined value types
#[derive(Parser, Debug)]
#[command(name = "idlvalue")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a runtime configuration file and print the effective settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./idlvalue.json")]
        config: PathBuf,
    },

    /// Print the external name assigned to each field name
    Sanitize {
        /// Path to configuration file; built-in defaults if omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Type the fields belong to
        type_name: String,

        /// Canonical field names in declaration order
        #[arg(required = true)]
        names: Vec<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
