// veridion-core/src/compositor.rs
//! Redaction compositor: turns classifier matches into a [`RedactionPlan`].
//!
//! Two matches describe the same redaction when they cover the same ordinal
//! set or the same rectangle; only the first one (in classifier emission
//! order) survives. Matches that merely overlap are kept side by side, since
//! painting a region twice is harmless. The plan is ordered by the first
//! matched ordinal, which makes the audit log follow reading order regardless
//! of rule declaration order. Pixels are never touched here.

use log::debug;
use std::collections::{BTreeSet, HashSet};

use crate::audit_log::{AuditAction, AuditEntry, RedactionPlan};
use crate::redaction_match::{canonical_sample_hash, PiiMatch};
use crate::token::{Rect, Token};

/// Drops matches that duplicate an earlier one, preserving emission order.
pub fn dedupe_matches(matches: Vec<PiiMatch>) -> Vec<PiiMatch> {
    let mut seen_ordinals: HashSet<BTreeSet<usize>> = HashSet::new();
    let mut seen_rects: HashSet<Rect> = HashSet::new();
    let mut kept = Vec::with_capacity(matches.len());

    for m in matches {
        if seen_ordinals.contains(&m.ordinals) || seen_rects.contains(&m.rect) {
            debug!(
                "Collapsing duplicate match from rule '{}' at {} (ordinals {:?})",
                m.rule_name, m.rect, m.ordinals
            );
            continue;
        }
        seen_ordinals.insert(m.ordinals.clone());
        seen_rects.insert(m.rect);
        kept.push(m);
    }
    kept
}

/// Builds the plan for one document from its tokens and classifier matches.
///
/// `tokens` must be the normalized sequence the matches were computed from.
pub fn compose(matches: Vec<PiiMatch>, tokens: &[Token]) -> RedactionPlan {
    let total = matches.len();
    let mut kept = dedupe_matches(matches);
    // Stable: ties keep classifier emission order.
    kept.sort_by_key(PiiMatch::first_ordinal);

    let entries: Vec<AuditEntry> = kept
        .into_iter()
        .map(|m| {
            let text = m.text(tokens);
            debug!(
                "Planned redaction {} for rule '{}' (sample {})",
                m.rect,
                m.rule_name,
                &canonical_sample_hash(&m.rule_name, &text)[..12]
            );
            AuditEntry {
                text,
                action: AuditAction::Redacted,
                coordinates: m.rect,
                first_ordinal: m.first_ordinal(),
                rule_name: m.rule_name,
            }
        })
        .collect();

    debug!(
        "Composed {} redaction(s) from {} raw match(es).",
        entries.len(),
        total
    );
    RedactionPlan { entries }
}
