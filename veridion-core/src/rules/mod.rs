//! Rule compilation for the PII classifier.
//!
//! Declared rules (`config::RedactionRule`) are validated and compiled once,
//! when an engine is built, into `CompiledRules`. Any problem surfaces there as
//! a `ConfigurationError`, never while a document is being classified.

pub mod compiler;
