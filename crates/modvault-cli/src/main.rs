//! modvault CLI - Command-line interface for tracker module inspection
//!
//! This binary provides commands for inspecting MOD, S3M, XM and IT modules,
//! dumping their samples, and converting ProTracker modules to and from JSON.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Use modules from the library crate
use modvault_cli::commands;

/// modvault - Tracker module decoder and ProTracker document converter
#[derive(Parser)]
#[command(name = "modvault")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log decoder details to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print format, title, patterns, samples and instruments of a module
    Info {
        /// Path to the module file (MOD, S3M, XM, IT, or a zip holding one)
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write every non-empty sample's PCM to NN-name.raw
    Samples {
        /// Path to the module file
        #[arg(short, long)]
        input: String,

        /// Directory receiving the raw sample files
        #[arg(short, long)]
        out_dir: String,
    },

    /// Export a module as a JSON document
    Export {
        /// Path to the module file
        #[arg(short, long)]
        input: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print the output JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Rebuild a ProTracker module from a JSON document
    Import {
        /// Path to the JSON document
        #[arg(short, long)]
        doc: String,

        /// Path of the MOD file to write
        #[arg(short, long)]
        output: String,
    },

    /// Recursively load every module file under a directory
    Scan {
        /// Directory to scan
        #[arg(short, long, env = "MODVAULT_SCAN_DIR")]
        dir: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

/// Log to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Info { input, json } => commands::info::run(&input, json),
        Commands::Samples { input, out_dir } => commands::samples::run(&input, &out_dir),
        Commands::Export {
            input,
            output,
            pretty,
        } => commands::export::run(&input, output.as_deref(), pretty),
        Commands::Import { doc, output } => commands::import::run(&doc, &output),
        Commands::Scan { dir, json } => commands::scan::run(&dir, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
