//! Export command implementation
//!
//! Converts a module to its JSON document, on stdout or into a file.

use anyhow::{Context, Result};
use colored::Colorize;
use modvault_format::document;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::input::load_module;

/// Run the export command
///
/// # Arguments
/// * `input` - Path to the module file
/// * `output` - Output file path (default: stdout)
/// * `pretty` - Pretty-print the JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, output: Option<&str>, pretty: bool) -> Result<ExitCode> {
    let loaded = load_module(Path::new(input))?;
    let json = export_json(&loaded.module, pretty)?;

    match output {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("Failed to write to: {}", path))?;
            println!(
                "{} Exported {} to: {}",
                "SUCCESS".green().bold(),
                loaded.module.format().display_name(),
                path
            );
        }
        // Keep stdout clean JSON
        None => println!("{}", json),
    }

    Ok(ExitCode::SUCCESS)
}

/// Serialize a module's document.
pub fn export_json(module: &modvault_format::Module, pretty: bool) -> Result<String> {
    let doc = document::export(module).context("Failed to export module")?;
    let json = if pretty {
        doc.to_json_pretty()
    } else {
        doc.to_json()
    }
    .context("Failed to serialize document")?;
    Ok(json)
}
