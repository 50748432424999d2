// veridion-core/src/engine.rs
//! Defines the `RedactionEngine` trait.
//!
//! The trait is the seam between front ends (CLI, headless helpers) and the
//! classification strategy. An engine owns its compiled rules, holds no
//! per-document state, and is `Send + Sync` so one instance can serve many
//! documents concurrently.
//!
//! License: MIT OR APACHE 2.0

use crate::audit_log::RedactionPlan;
use crate::compositor;
use crate::config::RedactionConfig;
use crate::errors::ShieldError;
use crate::redaction_match::PiiMatch;
use crate::rules::compiler::CompiledRules;
use crate::token::{normalize, RawOcrRecords, Token};

pub trait RedactionEngine: Send + Sync {
    /// Evaluates every rule against a normalized token sequence.
    ///
    /// Returns all matches, possibly overlapping, in emission order: ordinal
    /// ascending, then rule declaration order. Never fails.
    fn classify(&self, tokens: &[Token]) -> Vec<PiiMatch>;

    /// Runs the full pipeline for one document's OCR output.
    ///
    /// Fails only with `InputFormatError`, in which case no plan exists.
    fn plan(&self, records: &RawOcrRecords) -> Result<RedactionPlan, ShieldError> {
        let tokens = normalize(records)?;
        let matches = self.classify(&tokens);
        Ok(compositor::compose(matches, &tokens))
    }

    /// Returns the compiled rules used by the engine.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns the configuration the engine was built from.
    fn get_rules(&self) -> &RedactionConfig;
}
