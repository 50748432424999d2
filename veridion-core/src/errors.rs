//! errors.rs - Custom error types for the veridion-core library.
//!
//! Only two things can go wrong in the engine: the OCR input handed to a
//! single document call is malformed, or the rule set handed to the engine at
//! construction time is invalid. Classification and composition themselves
//! are total over well-formed input.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by the `veridion-core` library.
///
/// `#[non_exhaustive]` so downstream matches keep compiling if a variant is added.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShieldError {
    /// The OCR record set is malformed or inconsistent. Fatal to the current
    /// document; no partial plan is produced.
    #[error("Malformed OCR input: {0}")]
    InputFormatError(String),

    /// A rule declaration is invalid. Raised before any document is processed.
    #[error("Invalid rule configuration: {0}")]
    ConfigurationError(String),
}

impl ShieldError {
    pub fn input(msg: impl Into<String>) -> Self {
        ShieldError::InputFormatError(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ShieldError::ConfigurationError(msg.into())
    }

    /// True if this error is attributable to the document rather than the engine setup.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ShieldError::InputFormatError(_))
    }
}
