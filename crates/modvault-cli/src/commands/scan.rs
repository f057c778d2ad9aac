//! Scan command implementation
//!
//! Walks a directory tree, loads every module file it finds and reports
//! per-file results. A file that fails to load is recorded and skipped.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::info::classify;
use super::json_output::{error_codes, JsonError, ModuleSummary, ScanEntry, ScanOutput};
use crate::input::{has_module_extension, load_module};

/// Run the scan command
///
/// # Arguments
/// * `dir` - Directory to scan recursively
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 if every file loaded, 1 if any failed
pub fn run(dir: &str, json_output: bool) -> Result<ExitCode> {
    let root = Path::new(dir);
    if !root.is_dir() {
        if json_output {
            let error = JsonError::new(
                error_codes::NOT_A_DIRECTORY,
                format!("Input path is not a directory: {}", dir),
            );
            println!(
                "{}",
                serde_json::to_string_pretty(&ScanOutput::failure(dir, error))?
            );
            return Ok(ExitCode::from(1));
        } else {
            anyhow::bail!("Input path is not a directory: {}", dir);
        }
    }

    if !json_output {
        println!("{} {}", "Scanning:".cyan().bold(), dir);
    }

    let files = find_module_files(root);
    debug!(count = files.len(), "found candidate module files");

    let entries: Vec<ScanEntry> = files.iter().map(|path| scan_file(path)).collect();
    let output = ScanOutput::from_entries(dir, entries);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_results(&output);
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// All files under `root` with a module extension, sorted.
pub fn find_module_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| has_module_extension(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    // Sort for deterministic output
    files.sort();
    files
}

/// Load one file, capturing any failure in the entry.
pub fn scan_file(path: &Path) -> ScanEntry {
    let path_str = path.display().to_string();
    match load_module(path) {
        Ok(loaded) => ScanEntry {
            path: path_str,
            module: Some(ModuleSummary::from_module(&loaded.module)),
            error: None,
        },
        Err(e) => {
            warn!(path = %path_str, error = %format!("{:#}", e), "skipping unreadable module");
            ScanEntry {
                error: Some(JsonError::new(classify(&e), format!("{:#}", e)).with_file(&path_str)),
                path: path_str,
                module: None,
            }
        }
    }
}

fn print_results(output: &ScanOutput) {
    for entry in &output.files {
        match (&entry.module, &entry.error) {
            (Some(module), _) => println!(
                "  {} {} {} {}",
                "+".green(),
                entry.path,
                format!("[{}]", module.format).dimmed(),
                module.title
            ),
            (None, Some(error)) => println!(
                "  {} {} {}",
                "x".red(),
                entry.path,
                error.message.red()
            ),
            (None, None) => {}
        }
    }

    let summary = &output.summary;
    println!(
        "\n{} {} file(s), {} loaded, {} failed",
        if summary.failed == 0 {
            "SUCCESS".green().bold()
        } else {
            "FAILED".red().bold()
        },
        summary.total,
        summary.loaded,
        summary.failed
    );
}
