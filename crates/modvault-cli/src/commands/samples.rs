//! Samples command implementation
//!
//! Dumps the raw PCM of every non-empty sample to `NN-name.raw`.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use crate::input::load_module;

/// Run the samples command
///
/// # Arguments
/// * `input` - Path to the module file
/// * `out_dir` - Directory receiving the `.raw` files (created if missing)
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, out_dir: &str) -> Result<ExitCode> {
    println!("{} {}", "Extracting samples:".cyan().bold(), input);

    let loaded = load_module(Path::new(input))?;
    let written = write_samples(&loaded.module, Path::new(out_dir))?;

    for path in &written {
        println!("  {} {}", "+".green(), path.display());
    }
    println!(
        "{} Wrote {} sample(s) to {}",
        "SUCCESS".green().bold(),
        written.len(),
        out_dir
    );

    Ok(ExitCode::SUCCESS)
}

/// Write each non-empty sample and return the created paths in table order.
pub fn write_samples(module: &modvault_format::Module, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;

    let mut written = Vec::new();
    for (index, sample) in module.samples().into_iter().enumerate() {
        if sample.is_empty() {
            continue;
        }
        let path = out_dir.join(raw_file_name(index, sample.name()));
        fs::write(&path, sample.data())
            .with_context(|| format!("Failed to write sample: {}", path.display()))?;
        debug!(index, len = sample.data().len(), path = %path.display(), "wrote sample");
        written.push(path);
    }
    Ok(written)
}

/// `NN-name.raw`, numbered from 1, with the name reduced to a safe file stem.
pub fn raw_file_name(index: usize, name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.is_empty() { "sample" } else { &stem };
    format!("{:02}-{}.raw", index + 1, stem)
}
