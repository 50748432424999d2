// veridion-core/src/engines/mod.rs
//! Concrete `RedactionEngine` implementations.
//!
//! Each engine lives in its own file and is declared here with `pub mod`.

pub mod regex_engine;
