//! Info command implementation
//!
//! Prints the format, title, pattern count, samples and instruments of a module.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    error_codes, InfoOutput, InstrumentSummary, JsonError, ModuleSummary, SampleSummary,
};
use crate::input::{load_module, LoadedModule};

/// Run the info command
///
/// # Arguments
/// * `input` - Path to the module file (plain or single-entry zip)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input)
    } else {
        run_human(input)
    }
}

fn run_human(input: &str) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), input);

    let LoadedModule { input: source, module } = load_module(Path::new(input))?;
    if let Some(entry) = &source.archive_entry {
        println!("{} {}", "Archive entry:".dimmed(), entry);
    }

    let summary = ModuleSummary::from_module(&module);
    println!("  {:<12} {}", "Format:".bold(), module.format().display_name());
    println!("  {:<12} {}", "Title:".bold(), summary.title);
    println!("  {:<12} {}", "Patterns:".bold(), summary.pattern_count);

    let samples: Vec<_> = module
        .samples()
        .into_iter()
        .enumerate()
        .filter(|(_, s)| !s.is_empty() || !s.name().is_empty())
        .map(|(i, s)| SampleSummary::from_sample(i, s))
        .collect();
    println!(
        "\n{} ({} of {} in use)",
        "Samples".cyan().bold(),
        samples.len(),
        summary.sample_count
    );
    for sample in &samples {
        println!(
            "  {:>3}  {:<28} {:>8} bytes",
            sample.index + 1,
            sample.name,
            sample.length
        );
    }

    // MOD and S3M instruments mirror their samples one to one.
    if matches!(
        module,
        modvault_format::Module::FastTracker(_) | modvault_format::Module::ImpulseTracker(_)
    ) {
        println!(
            "\n{} ({})",
            "Instruments".cyan().bold(),
            summary.instrument_count
        );
        for (i, view) in module.instruments().iter().enumerate() {
            let instrument = InstrumentSummary::from_view(i, view);
            println!(
                "  {:>3}  {:<28} {} sample(s)",
                instrument.index + 1,
                instrument.name,
                instrument.samples
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_json(input: &str) -> Result<ExitCode> {
    let output = match load_module(Path::new(input)) {
        Ok(loaded) => info_output(input, &loaded),
        Err(e) => InfoOutput::failure(
            input,
            JsonError::new(classify(&e), format!("{:#}", e)).with_file(input),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Build the JSON record for a decoded module.
pub fn info_output(input: &str, loaded: &LoadedModule) -> InfoOutput {
    let module = &loaded.module;
    InfoOutput {
        success: true,
        errors: Vec::new(),
        input: input.to_string(),
        archive_entry: loaded.input.archive_entry.clone(),
        module: Some(ModuleSummary::from_module(module)),
        samples: module
            .samples()
            .into_iter()
            .enumerate()
            .map(|(i, s)| SampleSummary::from_sample(i, s))
            .collect(),
        instruments: module
            .instruments()
            .iter()
            .enumerate()
            .map(|(i, v)| InstrumentSummary::from_view(i, v))
            .collect(),
    }
}

/// Pick a stable error code for a load failure.
pub(crate) fn classify(error: &anyhow::Error) -> &'static str {
    if error.downcast_ref::<modvault_format::ModuleError>().is_some() {
        error_codes::DECODE
    } else {
        error_codes::FILE_READ
    }
}
