//! `veridion redact`: runs one document through the redaction pipeline.
//!
//! Fail-closed: nothing is written unless a complete plan was produced, and
//! a failed report write removes the rectangle file written before it.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use veridion_core::{redact_document, AuditReport, RegexEngine};

use crate::cli::RedactCommand;
use crate::commands::{apply_rule_selection, load_rule_config};
use crate::ocr::FileOcrProvider;
use crate::ui::{output_format, redaction_summary};

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Runs the `redact` command.
pub fn run_redact(cmd: &RedactCommand, quiet: bool) -> Result<()> {
    info!("Starting redact operation.");

    let mut config = load_rule_config(cmd.config.as_deref())?;
    apply_rule_selection(&mut config, &cmd.enable, &cmd.disable, quiet);
    let engine = RegexEngine::new(config).context("Failed to build the redaction engine")?;

    let raw = fs::read(&cmd.ocr)
        .with_context(|| format!("Failed to read OCR file {}", cmd.ocr.display()))?;
    let provider = FileOcrProvider::for_path(&cmd.ocr, cmd.format);

    let plan = redact_document(&provider, &engine, &raw)
        .with_context(|| format!("Document {} was not redacted", cmd.ocr.display()))?;
    debug!("Plan ready with {} entries.", plan.len());

    let report = AuditReport::new(&plan, &cmd.ocr.display().to_string(), &raw);
    let report_json = report.to_json_pretty().context("Failed to serialize audit report")?;
    let boxes_json = match &cmd.boxes {
        Some(_) => Some(serde_json::to_string_pretty(&plan.rects()).context("Failed to serialize rectangles")?),
        None => None,
    };

    if let (Some(path), Some(json)) = (&cmd.boxes, &boxes_json) {
        write_payload(path, json).with_context(|| format!("Failed to write rectangles {}", path.display()))?;
    }

    if let Err(e) = write_report(cmd.output.as_deref(), &report_json) {
        if let Some(path) = &cmd.boxes {
            debug!("Removing {} after failed report write.", path.display());
            let _ = fs::remove_file(path);
        }
        return Err(e);
    }

    if !quiet {
        if let Some(path) = &cmd.boxes {
            info_msg(format!("Wrote {} rectangle(s) to {}", plan.len(), path.display()));
        }
        if let Some(path) = &cmd.output {
            info_msg(format!("Wrote audit report to {}", path.display()));
        }
    }

    if !cmd.no_summary && !quiet {
        redaction_summary::print_summary(&plan, &mut io::stderr())?;
    }

    info!("Redact operation completed.");
    Ok(())
}

fn write_payload(path: &Path, json: &str) -> io::Result<()> {
    fs::write(path, format!("{}\n", json))
}

fn write_report(path: Option<&Path>, report_json: &str) -> Result<()> {
    match path {
        Some(path) => write_payload(path, report_json)
            .with_context(|| format!("Failed to write audit report {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", report_json).context("Failed to write audit report to stdout")
        }
    }
}
