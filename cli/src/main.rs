mod orders;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use json_expectations_core::{
    Document, ExpectationError, Layout, OutputOptions, ScalarExpectation, ViolationFormat,
    Violations,
};
use orders::{OrderBatch, Priority};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "json-expectations")]
#[command(about = "Validate and normalize order-intake JSON, reporting every violation by path")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an order batch and report every violation
    Check {
        /// Input JSON file (`-` reads stdin)
        input: PathBuf,

        /// Violation report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Validate an order batch and write it back in canonical form
    Normalize {
        /// Input JSON file (`-` reads stdin)
        input: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output layout
        #[arg(long, value_enum, default_value_t = OutputLayout::Pretty)]
        layout: OutputLayout,

        /// Violation report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

impl From<ReportFormat> for ViolationFormat {
    fn from(val: ReportFormat) -> Self {
        match val {
            ReportFormat::Text => ViolationFormat::Text,
            ReportFormat::Json => ViolationFormat::Json,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputLayout {
    Pretty,
    Compact,
}

impl From<OutputLayout> for Layout {
    fn from(val: OutputLayout) -> Self {
        match val {
            OutputLayout::Pretty => Layout::Indented,
            OutputLayout::Compact => Layout::Compact,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for reports and documents
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { input, format } => {
            let options = OutputOptions {
                violations: format.into(),
                ..OutputOptions::default()
            };

            match read_batch(&input)? {
                Ok(batch) => {
                    let units = batch
                        .orders()
                        .iter()
                        .fold(0i64, |acc, o| acc.saturating_add(o.quantity.get()));
                    let value: f64 = batch.orders().iter().map(|o| o.total.get()).sum();
                    let rushed = batch
                        .orders()
                        .iter()
                        .filter(|o| !o.priority.matches(&Priority::Standard))
                        .count();
                    if let Some((earliest, latest)) = batch.placed_window() {
                        tracing::debug!(
                            orders = batch.orders().len(),
                            units,
                            value,
                            rushed,
                            %earliest,
                            %latest,
                            "batch accepted"
                        );
                    }
                    write_text("ok", None)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(violations) => report(&violations, &options),
            }
        }
        Commands::Normalize {
            input,
            output,
            layout,
            format,
        } => {
            let options = OutputOptions {
                layout: layout.into(),
                violations: format.into(),
            };

            match read_batch(&input)? {
                Ok(batch) => {
                    write_text(&batch.to_text_with(&options), output.as_ref())?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(violations) => report(&violations, &options),
            }
        }
    }
}

/// Read and validate a batch. The outer error is I/O; the inner one is the
/// violation set to report.
fn read_batch(input: &Path) -> Result<std::result::Result<OrderBatch, Violations>> {
    let reader: Box<dyn Read> = if input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(input)
            .with_context(|| format!("Failed to open input file: {}", input.display()))?;
        Box::new(BufReader::new(file))
    };

    match OrderBatch::from_reader(reader) {
        Ok(batch) => Ok(Ok(batch)),
        Err(ExpectationError::Violated(violations)) => Ok(Err(violations)),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read input: {}", input.display()))
        }
    }
}

fn report(violations: &Violations, options: &OutputOptions) -> Result<ExitCode> {
    tracing::debug!(count = violations.len(), "input rejected");
    let rendered = violations
        .render_with(options.violations)
        .context("Failed to render violations")?;
    write_text(&rendered, None)?;
    Ok(ExitCode::FAILURE)
}

fn write_text(text: &str, path: Option<&PathBuf>) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    writer
        .write_all(text.as_bytes())
        .context("Failed to write output")?;

    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
