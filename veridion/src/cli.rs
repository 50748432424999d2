//! This file defines the command-line interface (CLI) for the veridion
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "veridion",
    author = "Veridion",
    version = env!("CARGO_PKG_VERSION"),
    about = "Plan PII redactions for a scanned document from its OCR output",
    long_about = "Veridion Shield reads the word-level output of an OCR engine (Tesseract TSV or pytesseract's image_to_data JSON), finds personally-identifiable information with a configurable rule set, and emits the rectangles to black out together with an audit log of every redaction.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `veridion` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classifies PII in OCR output and writes the redaction plan and audit log.
    #[command(about = "Classify PII in OCR output and write the redaction plan and audit log.")]
    Redact(RedactCommand),

    /// Lists the rules the engine will run.
    #[command(about = "List the active PII rules.")]
    Rules(RulesCommand),
}

/// Layout of the OCR input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OcrFormat {
    /// pytesseract `image_to_data(..., output_type=Output.DICT)` dumped as JSON.
    Json,
    /// Tesseract's native TSV output.
    Tsv,
}

/// Arguments for the `redact` command.
#[derive(Parser, Debug)]
pub struct RedactCommand {
    /// OCR output for the document.
    #[arg(long, short = 'i', value_name = "FILE", help = "OCR output file (Tesseract TSV or image_to_data JSON).")]
    pub ocr: PathBuf,

    /// Input layout; inferred from the file extension when omitted.
    #[arg(long, value_enum, value_name = "FORMAT", help = "OCR input format. Defaults to tsv for *.tsv files, json otherwise.")]
    pub format: Option<OcrFormat>,

    /// Path to a custom rule file (YAML), merged over the defaults.
    #[arg(long = "config", value_name = "FILE", env = "VERIDION_RULES", help = "Path to a custom rule file (YAML).")]
    pub config: Option<PathBuf>,

    /// Explicitly enable these opt-in rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these opt-in rule names (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Write the audit report to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write the audit report to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Write the rectangles to paint, as JSON, to this file.
    #[arg(long, value_name = "FILE", help = "Write the redaction rectangles (JSON) to a file.")]
    pub boxes: Option<PathBuf>,

    /// Suppress the redaction summary.
    #[arg(long = "no-redaction-summary", help = "Suppress the redaction summary.")]
    pub no_summary: bool,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    /// Path to a custom rule file (YAML), merged over the defaults.
    #[arg(long = "config", value_name = "FILE", env = "VERIDION_RULES", help = "Path to a custom rule file (YAML).")]
    pub config: Option<PathBuf>,

    /// Explicitly enable these opt-in rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable these opt-in rule names (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,
}
