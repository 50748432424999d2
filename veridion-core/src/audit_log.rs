// veridion-core/src/audit_log.rs
//! Audit records for applied redactions.
//!
//! A [`RedactionPlan`] is the ordered list of [`AuditEntry`]s produced by the
//! compositor, paired 1:1 with the rectangles handed to the renderer. Its
//! serialized form is a list of `{text, action, coordinates}` records, or an
//! explicit sentinel when nothing was found so that "ran, found nothing" is
//! distinguishable from "did not run".

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

use crate::token::Rect;

/// Status message emitted in place of an empty record list.
pub const NO_PII_SENTINEL: &str = "No PII found matching the configured patterns.";

/// What was done to a region. Only redaction exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    #[default]
    Redacted,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuditAction::Redacted => write!(f, "REDACTED"),
        }
    }
}

/// One applied redaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Matched token texts in ordinal order, space-separated.
    pub text: String,
    pub action: AuditAction,
    pub coordinates: Rect,
    /// Rule that produced the surviving match.
    pub rule_name: String,
    /// Ordinal of the first matched token; the plan is sorted by this.
    pub first_ordinal: usize,
}

/// The serialized shape of an [`AuditEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub text: String,
    pub action: String,
    /// Rendered as `"(x,y,w,h)"`.
    pub coordinates: String,
}

impl AuditEntry {
    pub fn to_record(&self) -> AuditRecord {
        AuditRecord {
            text: self.text.clone(),
            action: self.action.to_string(),
            coordinates: self.coordinates.to_string(),
        }
    }
}

/// Ordered, deduplicated redactions for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionPlan {
    pub entries: Vec<AuditEntry>,
}

impl RedactionPlan {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Rectangles to paint, in plan order.
    pub fn rects(&self) -> Vec<Rect> {
        self.entries.iter().map(|e| e.coordinates).collect()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.entries.iter().map(AuditEntry::to_record).collect()
    }

    /// JSON audit log: the record list, or the no-PII sentinel object.
    pub fn to_audit_json(&self) -> Value {
        if self.entries.is_empty() {
            json!({ "status": NO_PII_SENTINEL })
        } else {
            json!(self.records())
        }
    }
}

/// A complete audit log for one run, as written by front ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub run_id: String,
    pub timestamp: String,
    pub source: String,
    /// SHA-256 of the raw OCR input the plan was derived from.
    pub input_hash: String,
    pub redaction_count: usize,
    pub findings: Value,
}

impl AuditReport {
    pub fn new(plan: &RedactionPlan, source: &str, raw_input: &[u8]) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            source: source.to_string(),
            input_hash: hash_input(raw_input),
            redaction_count: plan.len(),
            findings: plan.to_audit_json(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn hash_input(raw_input: &[u8]) -> String {
    hex::encode(Sha256::digest(raw_input))
}
