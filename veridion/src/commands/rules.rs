//! `veridion rules`: prints the active rule set.
//!
//! Only rules the engine actually compiled are listed; opt-in rules that were
//! not enabled and rules declared with `enabled: false` are left out.

use anyhow::{Context, Result};
use log::debug;
use std::collections::HashSet;
use std::io::{self, Write};

use veridion_core::{RedactionEngine, RedactionRule, RegexEngine};

use crate::cli::RulesCommand;
use crate::commands::{apply_rule_selection, load_rule_config};
use crate::ui::redaction_summary::rules_table;

pub fn run_rules(cmd: &RulesCommand, quiet: bool) -> Result<()> {
    let mut config = load_rule_config(cmd.config.as_deref())?;
    apply_rule_selection(&mut config, &cmd.enable, &cmd.disable, quiet);
    let engine = RegexEngine::new(config).context("Rule set failed to compile")?;

    let active = active_rules(&engine);
    debug!("{} active rule(s) listed.", active.len());

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", rules_table(&active))?;
    Ok(())
}

/// Declared rules the engine compiled, in evaluation order.
fn active_rules<E: RedactionEngine>(engine: &E) -> Vec<&RedactionRule> {
    let compiled: HashSet<&str> = engine
        .compiled_rules()
        .rules
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    engine
        .get_rules()
        .rules
        .iter()
        .filter(|r| compiled.contains(r.name.as_str()))
        .collect()
}
