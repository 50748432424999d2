// veridion-core/src/engines/regex_engine.rs
//! A `RedactionEngine` implementation that classifies tokens with regular
//! expressions over single tokens and fixed-size token windows.
//! License: MIT OR APACHE 2.0

use log::{debug, trace};

use crate::config::RedactionConfig;
use crate::engine::RedactionEngine;
use crate::errors::ShieldError;
use crate::redaction_match::{log_pii_match_debug, log_rejected_match_debug, PiiMatch};
use crate::rules::compiler::{compile_config, CompiledKind, CompiledRule, CompiledRules};
use crate::token::Token;
use crate::validators;

/// A window of ordinal-adjacent tokens ending at some ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenWindow<'a> {
    /// Every token in the window, joiners included, in ordinal order.
    pub tokens: &'a [Token],
    /// Text presented to the predicate.
    pub text: String,
}

/// Collects the window of `size` non-joiner tokens ending at `end`.
///
/// A joiner token is glued without a space onto the token before it and does
/// not count toward `size`. Returns `None` when the window would read before
/// ordinal 0, or when it would end on (or start with) a joiner.
pub(crate) fn collect_window<'a>(
    tokens: &'a [Token],
    end: usize,
    size: usize,
    joiners: &[String],
) -> Option<TokenWindow<'a>> {
    if size == 0 || end >= tokens.len() {
        return None;
    }
    let is_joiner = |t: &Token| joiners.iter().any(|j| *j == t.text);
    if is_joiner(&tokens[end]) {
        return None;
    }

    let mut words: Vec<String> = Vec::with_capacity(size);
    let mut suffix = String::new();
    let mut pos = end;
    loop {
        let token = &tokens[pos];
        if is_joiner(token) {
            suffix.insert_str(0, &token.text);
        } else {
            words.push(format!("{}{}", token.text, suffix));
            suffix.clear();
            if words.len() == size {
                break;
            }
        }
        if pos == 0 {
            return None;
        }
        pos -= 1;
    }

    words.reverse();
    Some(TokenWindow {
        tokens: &tokens[pos..=end],
        text: words.join(" "),
    })
}

#[derive(Debug)]
pub struct RegexEngine {
    compiled_rules: CompiledRules,
    config: RedactionConfig,
}

impl RegexEngine {
    /// Compiles `config` and builds the engine. Any invalid rule fails here.
    pub fn new(config: RedactionConfig) -> Result<Self, ShieldError> {
        let compiled_rules = compile_config(&config)?;
        debug!(
            "RegexEngine ready with {} rule(s), widest window {}.",
            compiled_rules.len(),
            compiled_rules.max_window()
        );
        Ok(Self { compiled_rules, config })
    }

    fn accepts(&self, rule: &CompiledRule, text: &str) -> bool {
        if !rule.regex.is_match(text) {
            return false;
        }
        if rule.programmatic_validation && !validators::run_programmatic_validator(&rule.name, text) {
            log_rejected_match_debug(module_path!(), &rule.name, text);
            return false;
        }
        true
    }

    fn evaluate_at(&self, rule: &CompiledRule, tokens: &[Token], i: usize) -> Option<PiiMatch> {
        let found = match &rule.kind {
            CompiledKind::SingleToken => {
                let token = &tokens[i];
                if self.accepts(rule, &token.text) {
                    PiiMatch::from_tokens(&rule.name, std::slice::from_ref(token))
                } else {
                    None
                }
            }
            CompiledKind::TokenWindow { size, joiners } => {
                let window = collect_window(tokens, i, *size, joiners)?;
                trace!("Rule '{}' window ending at {} spans {} token(s).", rule.name, i, window.tokens.len());
                if self.accepts(rule, &window.text) {
                    PiiMatch::from_tokens(&rule.name, window.tokens)
                } else {
                    None
                }
            }
        };
        if let Some(m) = &found {
            let text = m.text(tokens);
            log_pii_match_debug(module_path!(), &m.rule_name, &text, &m.rect);
        }
        found
    }
}

impl RedactionEngine for RegexEngine {
    fn classify(&self, tokens: &[Token]) -> Vec<PiiMatch> {
        let mut matches = Vec::new();
        for i in 0..tokens.len() {
            for rule in &self.compiled_rules.rules {
                if let Some(m) = self.evaluate_at(rule, tokens, i) {
                    matches.push(m);
                }
            }
        }
        debug!("Classifier produced {} raw match(es) over {} token(s).", matches.len(), tokens.len());
        matches
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn get_rules(&self) -> &RedactionConfig {
        &self.config
    }
}
