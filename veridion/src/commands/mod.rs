//! Subcommand implementations.

pub mod redact;
pub mod rules;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::collections::HashSet;
use std::io;
use std::path::Path;

use veridion_core::{merge_rules, RedactionConfig};

use crate::ui::output_format;

/// Loads the default rules and merges an optional user rule file over them.
pub fn load_rule_config(user_path: Option<&Path>) -> Result<RedactionConfig> {
    let defaults = RedactionConfig::load_default_rules().context("Failed to load default rules")?;
    let user = match user_path {
        Some(path) => Some(
            RedactionConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rule file {}", path.display()))?,
        ),
        None => None,
    };
    let merged = merge_rules(defaults, user);
    debug!("Rule set has {} rule(s) after merge.", merged.rules.len());
    Ok(merged)
}

/// Returns the names in `requested` that no rule in `config` declares.
pub fn unknown_rule_names<'a>(config: &RedactionConfig, requested: &'a [String]) -> Vec<&'a str> {
    let known: HashSet<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
    let mut seen = HashSet::new();
    requested
        .iter()
        .map(String::as_str)
        .filter(|name| !known.contains(name) && seen.insert(*name))
        .collect()
}

/// Applies `--enable`/`--disable` to `config`, warning on stderr about names
/// that match no rule.
pub fn apply_rule_selection(config: &mut RedactionConfig, enable: &[String], disable: &[String], quiet: bool) {
    if !quiet {
        let supports_color = io::stderr().is_terminal();
        for (flag, names) in [("--enable", enable), ("--disable", disable)] {
            for name in unknown_rule_names(config, names) {
                let _ = output_format::print_warn_message(
                    &mut io::stderr(),
                    &format!("{} names unknown rule '{}'; ignored.", flag, name),
                    supports_color,
                );
            }
        }
    }
    config.set_active_rules(enable, disable);
}
