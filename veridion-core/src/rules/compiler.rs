//! compiler.rs - Compiles declared PII rules into ready-to-evaluate predicates.
//!
//! Compilation happens once per engine. The result is immutable and owned by
//! the engine, so concurrent documents can share it without locking.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::{validate_rules, RedactionConfig, RedactionRule, RuleKind};
use crate::errors::ShieldError;

/// How a compiled rule reads the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledKind {
    SingleToken,
    TokenWindow {
        /// Number of non-joiner tokens in the window. Always positive.
        size: usize,
        joiners: Vec<String>,
    },
}

/// A single compiled rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The unique name of the rule, reported in audit entries.
    pub name: String,
    /// The compiled pattern, already anchored if the rule asked for it.
    pub regex: Regex,
    pub kind: CompiledKind,
    /// If set, matches must also pass `validators::run_programmatic_validator`.
    pub programmatic_validation: bool,
}

/// All compiled rules, in declaration order.
#[derive(Debug, Default)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

impl CompiledRules {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Largest window size across all window rules, or 0 if there are none.
    pub fn max_window(&self) -> usize {
        self.rules
            .iter()
            .filter_map(|r| match &r.kind {
                CompiledKind::TokenWindow { size, .. } => Some(*size),
                CompiledKind::SingleToken => None,
            })
            .max()
            .unwrap_or(0)
    }
}

fn compile_one(rule: &RedactionRule) -> Result<CompiledRule, String> {
    let pattern = rule
        .pattern
        .as_deref()
        .ok_or_else(|| format!("Rule '{}' is missing the `pattern` field.", rule.name))?;

    let source = if rule.anchored {
        format!("^(?:{})$", pattern)
    } else {
        pattern.to_string()
    };

    let regex = RegexBuilder::new(&source)
        .case_insensitive(rule.case_insensitive)
        .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
        .build()
        .map_err(|e| format!("Failed to compile rule '{}': {}", rule.name, e))?;

    let kind = match rule.kind {
        RuleKind::SingleToken => CompiledKind::SingleToken,
        RuleKind::TokenWindow => match rule.window_size {
            Some(size) if size > 0 => CompiledKind::TokenWindow {
                size,
                joiners: rule.joiners.iter().map(|j| j.trim().to_string()).collect(),
            },
            other => {
                return Err(format!(
                    "Rule '{}' needs a positive `window_size`, got {:?}.",
                    rule.name, other
                ))
            }
        },
    };

    Ok(CompiledRule {
        name: rule.name.clone(),
        regex,
        kind,
        programmatic_validation: rule.programmatic_validation,
    })
}

/// Validates and compiles `rules_to_compile`, skipping disabled rules.
///
/// Every failing rule is reported in a single `ConfigurationError`.
pub fn compile_rules(rules_to_compile: &[RedactionRule]) -> Result<CompiledRules, ShieldError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());
    validate_rules(rules_to_compile)?;

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if !rule.is_enabled() {
            debug!("Skipping disabled rule '{}'.", rule.name);
            continue;
        }
        match compile_one(rule) {
            Ok(compiled) => {
                log::debug!(
                    target: "veridion_core::compiler",
                    "Rule '{}' compiled successfully ({:?}).",
                    compiled.name,
                    compiled.kind
                );
                compiled_rules.push(compiled);
            }
            Err(e) => compilation_errors.push(e),
        }
    }

    if !compilation_errors.is_empty() {
        return Err(ShieldError::config(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            compilation_errors.join("\n")
        )));
    }

    if compiled_rules.is_empty() {
        warn!("No active rules after compilation; every document will produce an empty plan.");
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules { rules: compiled_rules })
}

/// Compiles the rules of a whole configuration.
pub fn compile_config(config: &RedactionConfig) -> Result<CompiledRules, ShieldError> {
    compile_rules(&config.rules)
}
