//! CLI command implementations

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::RuntimeConfig;
use crate::schema::{Sanitizer, SchemaError};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments from the process and run the chosen command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let stdout = std::io::stdout();
    run_command(cli.command, &mut stdout.lock())
}

/// Run one command, writing its output to `out`.
pub fn run_command<W: Write>(command: Command, out: &mut W) -> CliResult<()> {
    match command {
        Command::CheckConfig { config } => check_config(&config, out),
        Command::Sanitize {
            config,
            type_name,
            names,
        } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => RuntimeConfig::default(),
            };
            sanitize(&config, &type_name, &names, out)
        }
    }
}

/// Read and validate a configuration file.
pub fn load_config(path: &Path) -> CliResult<RuntimeConfig> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(RuntimeConfig::from_json_str(&text)?)
}

/// Print the effective settings of a configuration file.
pub fn check_config<W: Write>(path: &Path, out: &mut W) -> CliResult<()> {
    let config = load_config(path)?;
    let rendered = serde_json::to_string_pretty(&config)?;
    write_line(out, &rendered)
}

/// Print `canonical -> external` for each name.
///
/// Names are one schema's fields, so each may appear once.
pub fn sanitize<W: Write>(
    config: &RuntimeConfig,
    type_name: &str,
    names: &[String],
    out: &mut W,
) -> CliResult<()> {
    let sanitizer = Sanitizer::new(config)?;
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(CliError::Fields(SchemaError::DuplicateFieldName {
                type_name: type_name.to_string(),
                name: name.clone(),
            }));
        }
    }

    let canonical: Vec<&str> = names.iter().map(String::as_str).collect();
    let external = sanitizer.assign(type_name, &canonical);

    for (c, e) in canonical.iter().zip(&external) {
        write_line(out, &format!("{} -> {}", c, e))?;
    }
    Ok(())
}

fn write_line<W: Write>(out: &mut W, line: &str) -> CliResult<()> {
    writeln!(out, "{}", line).map_err(|source| CliError::Io {
        path: "<stdout>".into(),
        source,
    })
}
