//! File-backed OCR provider.
//!
//! Running an OCR engine is outside this tool's job. Instead the user runs
//! Tesseract (or pytesseract) themselves and hands us its word-level output;
//! `FileOcrProvider` adapts those bytes to the core's `OcrProvider` seam.

use anyhow::Result;
use log::debug;
use std::path::Path;
use thiserror::Error;

use veridion_core::{OcrProvider, RawOcrRecords};

use crate::cli::OcrFormat;

#[derive(Error, Debug)]
pub enum OcrFileError {
    #[error("OCR output is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),
}

/// Parses pre-computed OCR output in a fixed format.
#[derive(Debug, Clone, Copy)]
pub struct FileOcrProvider {
    format: OcrFormat,
}

impl FileOcrProvider {
    pub fn new(format: OcrFormat) -> Self {
        Self { format }
    }

    /// Uses `format` if given, otherwise infers it from the file extension.
    pub fn for_path(path: &Path, format: Option<OcrFormat>) -> Self {
        let format = format.unwrap_or_else(|| infer_format(path));
        debug!("Using {:?} OCR format for {}.", format, path.display());
        Self::new(format)
    }

    pub fn format(&self) -> OcrFormat {
        self.format
    }
}

/// `.tsv` files are Tesseract TSV; anything else is treated as JSON.
pub fn infer_format(path: &Path) -> OcrFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => OcrFormat::Tsv,
        _ => OcrFormat::Json,
    }
}

impl OcrProvider for FileOcrProvider {
    fn recognize(&self, image: &[u8]) -> Result<RawOcrRecords> {
        let text = std::str::from_utf8(image).map_err(OcrFileError::from)?;
        let records = match self.format {
            OcrFormat::Json => RawOcrRecords::from_json(text)?,
            OcrFormat::Tsv => RawOcrRecords::from_tesseract_tsv(text)?,
        };
        Ok(records)
    }
}
