//! gavel CLI - Validate recorded HTTP messages against their expectations

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gavel_comparators::validate;
use gavel_core::{HttpMessage, ValidationReport};

#[derive(Parser)]
#[command(name = "gavel")]
#[command(about = "Validate recorded HTTP messages against their expectations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "terminal")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a fixture (.toml, .json, .yaml)
    Validate {
        /// Fixture file holding the real message and its expectation
        file: PathBuf,
    },

    /// Write an example fixture
    Init {
        /// Destination path
        #[arg(default_value = ".gavel.toml")]
        path: PathBuf,
    },

    /// Export JSON Schema for the validation report
    Schema,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Terminal,
    Json,
    Silent,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(3)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<u8> {
    match cli.command {
        Commands::Validate { file } => {
            let mut message = HttpMessage::load(&file)?;
            debug!(file = %file.display(), "loaded fixture");

            let report = validate(&mut message)
                .with_context(|| format!("cannot validate {}", file.display()))?;
            if let Some(rendered) = render(report, cli.output)? {
                println!("{rendered}");
            }
            Ok(exit_code(report))
        }

        Commands::Init { path } => {
            if !write_example(&path)? {
                eprintln!("{} already exists", path.display());
                return Ok(1);
            }
            println!("Created {}", path.display());
            println!("\nEdit the file to describe:");
            println!("  - kind: request or response");
            println!("  - headers, body, statusCode: the real message");
            println!("  - [expected]: headers, body or bodySchema, statusCode");
            Ok(0)
        }

        Commands::Schema => {
            println!("{}", gavel_core::report::generate_schema()?);
            Ok(0)
        }
    }
}

/// Render a report for the chosen output format, `None` when silent
fn render(report: &ValidationReport, format: OutputFormat) -> Result<Option<String>> {
    Ok(match format {
        OutputFormat::Terminal => Some(report.to_terminal()),
        OutputFormat::Json => Some(serde_json::to_string_pretty(report)?),
        OutputFormat::Silent => None,
    })
}

fn exit_code(report: &ValidationReport) -> u8 {
    if report.is_valid() { 0 } else { 1 }
}

/// Write the example fixture unless `path` already exists
fn write_example(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    std::fs::write(path, HttpMessage::example())
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(true)
}
