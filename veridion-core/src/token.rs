// veridion-core/src/token.rs
//! OCR token model and the normalizer that turns raw OCR records into a dense,
//! ordinal-indexed token sequence.
//!
//! The OCR engine itself is an external collaborator. This module only accepts
//! its output, in the parallel-array layout produced by Tesseract's
//! `image_to_data` (JSON) or its TSV renderer, and produces [`Token`]s.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ShieldError;

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge. Widened so `x + w` never overflows.
    pub fn right(&self) -> u64 {
        u64::from(self.x) + u64::from(self.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        u64::from(self.y) + u64::from(self.h)
    }

    /// Smallest rectangle enclosing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect {
            x,
            y,
            w: clamp_extent(right - u64::from(x)),
            h: clamp_extent(bottom - u64::from(y)),
        }
    }

    /// Bounding rectangle of every rect in `rects`, or `None` if empty.
    pub fn enclosing<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects.into_iter().fold(None, |acc, r| match acc {
            None => Some(*r),
            Some(u) => Some(u.union(r)),
        })
    }
}

fn clamp_extent(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{},{},{})", self.x, self.y, self.w, self.h)
    }
}

/// A single recognized, non-blank text fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub rect: Rect,
    /// Dense zero-based position among retained tokens, in OCR reading order.
    pub ordinal: usize,
}

/// Raw OCR output as parallel arrays, in the engine's emission order.
///
/// Field names match pytesseract's `Output.DICT`, so its JSON dump can be
/// deserialized directly. Extra keys (`level`, `conf`, `block_num`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOcrRecords {
    pub text: Vec<String>,
    pub left: Vec<u32>,
    pub top: Vec<u32>,
    pub width: Vec<u32>,
    pub height: Vec<u32>,
}

const TSV_REQUIRED_COLUMNS: [&str; 5] = ["left", "top", "width", "height", "text"];

impl RawOcrRecords {
    /// Appends one record to every column.
    pub fn push(&mut self, text: impl Into<String>, rect: Rect) {
        self.text.push(text.into());
        self.left.push(rect.x);
        self.top.push(rect.y);
        self.width.push(rect.w);
        self.height.push(rect.h);
    }

    /// Number of records, as declared by the `text` column.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Parses a pytesseract `image_to_data(..., output_type=Output.DICT)` JSON dump.
    pub fn from_json(input: &str) -> Result<Self, ShieldError> {
        serde_json::from_str(input)
            .map_err(|e| ShieldError::input(format!("OCR JSON could not be parsed: {}", e)))
    }

    /// Parses Tesseract's TSV output (`tesseract image out tsv`).
    ///
    /// Columns are located by header name so column order does not matter.
    /// Rows for page/block/line levels carry an empty trailing `text` cell and
    /// survive parsing; the normalizer drops them.
    pub fn from_tesseract_tsv(input: &str) -> Result<Self, ShieldError> {
        let mut lines = input.lines().filter(|l| !l.trim().is_empty());
        let header_line = lines
            .next()
            .ok_or_else(|| ShieldError::input("TSV input is empty; expected a header row"))?;
        let header: Vec<&str> = header_line.split('\t').map(str::trim).collect();

        let mut columns = [0usize; 5];
        for (slot, name) in columns.iter_mut().zip(TSV_REQUIRED_COLUMNS) {
            *slot = header
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| ShieldError::input(format!("TSV header is missing the '{}' column", name)))?;
        }
        let [left_col, top_col, width_col, height_col, text_col] = columns;

        let mut records = RawOcrRecords::default();
        for (row_idx, line) in lines.enumerate() {
            let fields: Vec<&str> = line.splitn(header.len(), '\t').collect();
            let row = row_idx + 2;
            let coord = |col: usize, name: &str| -> Result<u32, ShieldError> {
                let raw = fields.get(col).ok_or_else(|| {
                    ShieldError::input(format!("TSV row {} has no '{}' cell", row, name))
                })?;
                raw.trim().parse::<u32>().map_err(|_| {
                    ShieldError::input(format!("TSV row {}: '{}' value '{}' is not a pixel coordinate", row, name, raw))
                })
            };
            let rect = Rect::new(
                coord(left_col, "left")?,
                coord(top_col, "top")?,
                coord(width_col, "width")?,
                coord(height_col, "height")?,
            );
            let text = fields.get(text_col).copied().unwrap_or("");
            records.push(text, rect);
        }

        debug!("Parsed {} TSV records.", records.len());
        Ok(records)
    }

    fn check_lengths(&self) -> Result<(), ShieldError> {
        let expected = self.text.len();
        let columns = [
            ("left", self.left.len()),
            ("top", self.top.len()),
            ("width", self.width.len()),
            ("height", self.height.len()),
        ];
        for (name, len) in columns {
            if len != expected {
                return Err(ShieldError::input(format!(
                    "'text' has {} entries but '{}' has {}",
                    expected, name, len
                )));
            }
        }
        Ok(())
    }
}

/// Converts raw OCR records into an ordered token sequence.
///
/// Records whose trimmed text is empty are dropped and do not consume an
/// ordinal, so the returned ordinals are exactly `0..tokens.len()`.
pub fn normalize(records: &RawOcrRecords) -> Result<Vec<Token>, ShieldError> {
    records.check_lengths()?;

    let mut tokens = Vec::with_capacity(records.len());
    for i in 0..records.len() {
        let text = records.text[i].trim();
        if text.is_empty() {
            trace!("Dropping blank OCR record at emission index {}.", i);
            continue;
        }
        tokens.push(Token {
            text: text.to_string(),
            rect: Rect::new(records.left[i], records.top[i], records.width[i], records.height[i]),
            ordinal: tokens.len(),
        });
    }

    debug!(
        "Normalized {} OCR records into {} tokens.",
        records.len(),
        tokens.len()
    );
    Ok(tokens)
}
