//! Tabular summaries printed after a run.
//!
//! Matched text never appears here in the clear; the audit report is the
//! only place it is written.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::io::{self, Write};

use veridion_core::{redact_sensitive, RedactionPlan, RedactionRule, RuleKind};

/// Builds the per-redaction summary table.
pub fn summary_table(plan: &RedactionPlan) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Rule", "Coordinates", "Text"]);
    for (i, entry) in plan.entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            entry.rule_name.clone(),
            entry.coordinates.to_string(),
            redact_sensitive(&entry.text),
        ]);
    }
    table
}

pub fn print_summary<W: Write>(plan: &RedactionPlan, writer: &mut W) -> io::Result<()> {
    if plan.is_empty() {
        return writeln!(writer, "Redaction summary: no PII found.");
    }
    writeln!(writer, "Redaction summary: {} region(s) redacted.", plan.len())?;
    writeln!(writer, "{}", summary_table(plan))
}

/// Builds the rule listing table for the given rules, in order.
pub fn rules_table(rules: &[&RedactionRule]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rule", "Kind", "Window", "Validated", "Description"]);
    for rule in rules {
        let window = match rule.kind {
            RuleKind::TokenWindow => rule.window_size.map(|s| s.to_string()).unwrap_or_default(),
            RuleKind::SingleToken => "-".to_string(),
        };
        table.add_row(vec![
            rule.name.clone(),
            rule.kind.to_string(),
            window,
            if rule.programmatic_validation { "yes" } else { "no" }.to_string(),
            rule.description.clone().unwrap_or_default(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use veridion_core::{AuditAction, AuditEntry, Rect};

    #[test]
    fn test_summary_masks_text() {
        let plan = RedactionPlan {
            entries: vec![AuditEntry {
                text: "234123412346".into(),
                action: AuditAction::Redacted,
                coordinates: Rect::new(1, 2, 3, 4),
                rule_name: "NATIONAL_ID".into(),
                first_ordinal: 0,
            }],
        };
        let mut out = Vec::new();
        print_summary(&plan, &mut out).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.contains("NATIONAL_ID"));
        assert!(s.contains("(1,2,3,4)"));
        assert!(!s.contains("234123412346"));
    }

    #[test]
    fn test_rules_table_lists_defaults() {
        let config = veridion_core::RedactionConfig::load_default_rules().unwrap();
        let rules: Vec<&RedactionRule> = config.rules.iter().collect();
        let rendered = rules_table(&rules).to_string();
        assert!(rendered.contains("PERSON_NAME"));
        assert!(rendered.contains("token_window"));
    }
}
