// veridion-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for running the redaction pipeline in one call,
//! without any front end.
//!
//! The OCR engine is injected as an [`OcrProvider`]; nothing here reads
//! global or ambient configuration.

use anyhow::{Context, Result};
use log::info;

use crate::audit_log::RedactionPlan;
use crate::engine::RedactionEngine;
use crate::token::RawOcrRecords;

/// The external OCR collaborator: turns an encoded image into raw records.
pub trait OcrProvider {
    fn recognize(&self, image: &[u8]) -> Result<RawOcrRecords>;
}

/// Runs OCR through `ocr`, then the full engine pipeline, for one document.
///
/// Any failure leaves the caller with no plan at all; callers must not render
/// a redacted image in that case.
pub fn redact_document<O, E>(ocr: &O, engine: &E, image: &[u8]) -> Result<RedactionPlan>
where
    O: OcrProvider + ?Sized,
    E: RedactionEngine + ?Sized,
{
    let records = ocr.recognize(image).context("OCR provider failed")?;
    let plan = engine
        .plan(&records)
        .context("OCR output could not be processed")?;
    info!("Document processed: {} redaction(s) planned.", plan.len());
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedactionConfig;
    use crate::engines::regex_engine::RegexEngine;
    use crate::errors::ShieldError;
    use crate::token::Rect;

    struct FixedOcr(RawOcrRecords);

    impl OcrProvider for FixedOcr {
        fn recognize(&self, _image: &[u8]) -> Result<RawOcrRecords> {
            Ok(self.0.clone())
        }
    }

    struct BrokenOcr;

    impl OcrProvider for BrokenOcr {
        fn recognize(&self, _image: &[u8]) -> Result<RawOcrRecords> {
            anyhow::bail!("tesseract not installed")
        }
    }

    #[test]
    fn test_redact_document_uses_injected_ocr() -> Result<()> {
        let mut records = RawOcrRecords::default();
        records.push("ABCDE1234F", Rect::new(3, 4, 90, 12));
        let engine = RegexEngine::new(RedactionConfig::load_default_rules()?)?;
        let plan = redact_document(&FixedOcr(records), &engine, b"fake image")?;
        assert_eq!(plan.rects(), vec![Rect::new(3, 4, 90, 12)]);
        Ok(())
    }

    #[test]
    fn test_redact_document_surfaces_ocr_failure() -> Result<()> {
        let engine = RegexEngine::new(RedactionConfig::load_default_rules()?)?;
        assert!(redact_document(&BrokenOcr, &engine, b"").is_err());
        Ok(())
    }

    #[test]
    fn test_redact_document_rejects_mismatched_input() -> Result<()> {
        let mut records = RawOcrRecords::default();
        records.push("x", Rect::new(0, 0, 1, 1));
        records.top.clear();
        let engine = RegexEngine::new(RedactionConfig::load_default_rules()?)?;
        let err = redact_document(&FixedOcr(records), &engine, b"").unwrap_err();
        assert!(matches!(err.downcast_ref::<ShieldError>(), Some(ShieldError::InputFormatError(_))));
        Ok(())
    }
}
