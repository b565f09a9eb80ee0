//! Clientgen
//!
//! Generates a TypeScript REST client from a Swagger-style schema document.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clientgen::{CollectionFormat, EnvelopeMode, GeneratorConfig, generate_and_write};
use colored::Colorize;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Clientgen - transforms a REST API schema into a typed TypeScript client
#[derive(Parser, Debug)]
#[command(name = "clientgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema document to read (JSON, or YAML by extension)
    #[arg(short, long)]
    file: PathBuf,

    /// TypeScript file to write
    #[arg(short, long, default_value = "output.ts")]
    output: PathBuf,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Wire format for array-valued query parameters
    #[arg(long, value_enum, default_value_t = CollectionFormat::Multi)]
    collection_format: CollectionFormat,

    /// How single-key JSON envelopes are treated
    #[arg(long, value_enum, default_value_t = EnvelopeMode::Unwrap)]
    envelope: EnvelopeMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing on stderr from CLIENTGEN_LOG or the verbosity flags
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("CLIENTGEN_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,clientgen=info,clientgen_schema=info".to_string(),
            2 => "info,clientgen=debug,clientgen_schema=debug".to_string(),
            _ => "debug,clientgen=trace,clientgen_schema=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = GeneratorConfig::default()
        .with_collection_format(cli.collection_format)
        .with_envelope(cli.envelope);

    tracing::debug!(
        input = %cli.file.display(),
        output = %cli.output.display(),
        collection_format = %config.collection_format,
        envelope = %config.envelope,
        dry_run = cli.dry_run,
        "starting generation"
    );

    match generate_and_write(&cli.file, &cli.output, &config, cli.dry_run) {
        Ok(report) => {
            if !cli.dry_run {
                eprintln!(
                    "{} {} ({} types, {} enums, {} functions)",
                    "Generated".green().bold(),
                    cli.output.display(),
                    report.types,
                    report.enums,
                    report.functions
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
