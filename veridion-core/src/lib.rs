// veridion-core/src/lib.rs
//! # Veridion Shield Core Library
//!
//! `veridion-core` locates personally-identifiable information in the token
//! stream produced by an OCR engine and plans opaque redaction boxes for it,
//! together with an audit record of every redaction.
//!
//! The library never touches pixels and never runs OCR itself. Both are
//! external collaborators, reached through the [`OcrProvider`] and
//! [`RedactionSurface`] traits.
//!
//! ## Pipeline
//!
//! ```text
//! RawOcrRecords -> normalize -> classify -> compose -> RedactionPlan
//! ```
//!
//! * `token`: [`Rect`], [`Token`], [`RawOcrRecords`] and the normalizer.
//! * `config`: declared rules ([`RedactionRule`]) and rule sets ([`RedactionConfig`]).
//! * `rules`: compilation of declared rules into [`CompiledRules`].
//! * `validators`: programmatic checks (checksums) behind some rules.
//! * `engine` / `engines`: the [`RedactionEngine`] trait and [`RegexEngine`].
//! * `compositor`: deduplication and ordering of matches into a plan.
//! * `audit_log`: [`AuditEntry`], [`RedactionPlan`] and [`AuditReport`].
//! * `surface`: the rendering seam.
//! * `headless`: one-shot helpers.
//!
//! ## Usage Example
//!
//! ```rust
//! use veridion_core::{RawOcrRecords, Rect, RedactionConfig, RedactionEngine, RegexEngine};
//!
//! fn main() -> anyhow::Result<()> {
//!     let engine = RegexEngine::new(RedactionConfig::load_default_rules()?)?;
//!
//!     let mut records = RawOcrRecords::default();
//!     records.push("Name", Rect::new(0, 0, 40, 10));
//!     records.push("John", Rect::new(45, 0, 40, 10));
//!     records.push("Smith", Rect::new(90, 0, 50, 10));
//!
//!     let plan = engine.plan(&records)?;
//!     assert_eq!(plan.rects(), vec![Rect::new(0, 0, 140, 10)]);
//!     println!("{}", plan.to_audit_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible core operations return [`ShieldError`]: `InputFormatError` for a
//! malformed document, `ConfigurationError` for an invalid rule set. The
//! headless helpers wrap these in `anyhow::Error`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod audit_log;
pub mod compositor;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod redaction_match;
pub mod rules;
pub mod surface;
pub mod token;
pub mod validators;

/// Re-exports the rule declaration types and helpers.
pub use config::{merge_rules, RedactionConfig, RedactionRule, RuleKind, MAX_PATTERN_LENGTH};

/// Re-exports the error type.
pub use errors::ShieldError;

/// Re-exports the engine trait and its regex implementation.
pub use engine::RedactionEngine;
pub use engines::regex_engine::RegexEngine;

/// Re-exports the OCR token model and normalizer.
pub use token::{normalize, RawOcrRecords, Rect, Token};

pub use redaction_match::{redact_sensitive, PiiMatch};
pub use compositor::compose;

/// Re-exports the audit types.
pub use audit_log::{AuditAction, AuditEntry, AuditRecord, AuditReport, RedactionPlan, NO_PII_SENTINEL};

pub use surface::{paint_plan, PixelBuffer, RedactionSurface};

/// Re-exports the one-shot helpers.
pub use headless::{redact_document, OcrProvider};

pub use rules::compiler::{compile_rules, CompiledKind, CompiledRule, CompiledRules};
