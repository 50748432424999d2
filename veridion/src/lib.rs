// veridion/src/lib.rs
//! # Veridion Shield CLI
//!
//! Terminal front end for `veridion-core`: reads OCR output from disk, runs
//! the redaction pipeline, and writes the audit report and rectangles.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ocr;
pub mod ui;
