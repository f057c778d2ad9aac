//! Import command implementation
//!
//! Rebuilds a ProTracker module from a JSON document. The bytes are decoded
//! again before anything is written.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use modvault_format::{document, ModuleDocument, ModuleFormat};
use std::fs;
use std::process::ExitCode;

/// Run the import command
///
/// # Arguments
/// * `doc_path` - Path to the JSON document
/// * `output` - Path of the MOD file to write
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(doc_path: &str, output: &str) -> Result<ExitCode> {
    println!("{} {}", "Importing:".cyan().bold(), doc_path);

    let json = fs::read_to_string(doc_path)
        .with_context(|| format!("Failed to read document: {}", doc_path))?;
    let bytes = import_json(&json).with_context(|| format!("Failed to import: {}", doc_path))?;

    fs::write(output, &bytes).with_context(|| format!("Failed to write to: {}", output))?;
    println!(
        "{} Wrote {} bytes to: {}",
        "SUCCESS".green().bold(),
        bytes.len(),
        output
    );

    Ok(ExitCode::SUCCESS)
}

/// Parse a document, rebuild the module and check that it decodes.
pub fn import_json(json: &str) -> Result<Vec<u8>> {
    let doc = ModuleDocument::from_json(json).context("Failed to parse document")?;
    let bytes = document::import(&doc)?;

    let module = modvault_format::load(&bytes).context("Rebuilt module does not decode")?;
    if module.format() != ModuleFormat::ProTracker {
        bail!(
            "Rebuilt module sniffed as {} instead of protracker",
            module.format()
        );
    }
    tracing::debug!(
        title = module.title(),
        patterns = module.pattern_count(),
        "rebuilt module decodes"
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::export::export_json;
    use modvault_format::protracker::{ModSampleRecord, ModWriter};
    use pretty_assertions::assert_eq;

    fn mod_bytes() -> Vec<u8> {
        let mut writer = ModWriter::new("imported", 4).unwrap();
        writer.add_pattern(modvault_format::Pattern::new(64, 4)).unwrap();
        writer.set_order_table(&[0, 0]);
        writer
            .set_sample(
                0,
                ModSampleRecord {
                    name: "pad".to_string(),
                    volume: 48,
                    data: vec![3; 10],
                    ..Default::default()
                },
            )
            .unwrap();
        writer.to_bytes().unwrap()
    }

    #[test]
    fn test_export_then_import_is_identity() {
        let bytes = mod_bytes();
        let module = modvault_format::load(&bytes).unwrap();
        let json = export_json(&module, true).unwrap();

        assert_eq!(import_json(&json).unwrap(), bytes);
    }

    #[test]
    fn test_import_rejects_fasttracker_documents() {
        let bytes = mod_bytes();
        let module = modvault_format::load(&bytes).unwrap();
        let json = export_json(&module, false)
            .unwrap()
            .replace("\"protracker\"", "\"fasttracker\"");

        let err = import_json(&json).unwrap_err();
        assert!(err
            .downcast_ref::<modvault_format::ModuleError>()
            .is_some());
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let err = import_json("{").unwrap_err();
        assert!(err.to_string().contains("Failed to parse document"));
    }
}
