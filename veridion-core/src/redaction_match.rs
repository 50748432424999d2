// veridion-core/src/redaction_match.rs
//! Provides the classifier's match type and the logging helpers used whenever
//! matched (and therefore sensitive) text might reach a log line.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

use crate::token::{Rect, Token};

lazy_static! {
    /// Initialized once: whether raw PII may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("VERIDION_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// A single rule hit over one or more tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiMatch {
    pub rule_name: String,
    /// Ordinals of every participating token. Never empty.
    pub ordinals: BTreeSet<usize>,
    /// Bounding rectangle of every participating token.
    pub rect: Rect,
}

impl PiiMatch {
    /// Builds a match over `tokens`, which must be non-empty.
    pub fn from_tokens(rule_name: &str, tokens: &[Token]) -> Option<Self> {
        let rect = Rect::enclosing(tokens.iter().map(|t| &t.rect))?;
        Some(Self {
            rule_name: rule_name.to_string(),
            ordinals: tokens.iter().map(|t| t.ordinal).collect(),
            rect,
        })
    }

    pub fn first_ordinal(&self) -> usize {
        self.ordinals.first().copied().unwrap_or(0)
    }

    /// Space-joined text of the participating tokens, in ordinal order.
    pub fn text(&self, tokens: &[Token]) -> String {
        self.ordinals
            .iter()
            .filter_map(|&o| tokens.get(o))
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_pii_match_debug(module_path: &str, rule_name: &str, matched_text: &str, rect: &Rect) {
    debug!(
        "{} Found PiiMatch: Rule='{}', Text='{}', Rect={}",
        module_path,
        rule_name,
        get_loggable_content(matched_text),
        rect
    );
}

pub fn log_rejected_match_debug(module_path: &str, rule_name: &str, matched_text: &str) {
    debug!(
        "{} Rule '{}' matched '{}' but failed programmatic validation",
        module_path,
        rule_name,
        get_loggable_content(matched_text)
    );
}

/// Stable fingerprint for a matched snippet that does not reveal the snippet.
pub fn canonical_sample_hash(rule_id: &str, snippet: &str) -> String {
    let normalized = snippet.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut hasher = Sha256::new();
    hasher.update(rule_id.as_bytes());
    hasher.update(b":");
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}
