//! Configuration management for `veridion-core`.
//!
//! This module defines the PII rule declarations and the rule-set container.
//! It handles YAML (de)serialization, loading of the embedded default rules,
//! merging of user overrides, and validation of every declaration before an
//! engine is ever built from it.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::errors::ShieldError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// How a rule consumes tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// The pattern is tested against one token's text.
    #[default]
    SingleToken,
    /// The pattern is tested against `window_size` ordinal-adjacent tokens, space-joined.
    TokenWindow,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuleKind::SingleToken => write!(f, "single_token"),
            RuleKind::TokenWindow => write!(f, "token_window"),
        }
    }
}

/// A single declared PII rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RedactionRule {
    /// Unique identifier for the rule (e.g., "NATIONAL_ID"). Reported in audit entries.
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    pub kind: RuleKind,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// Number of tokens in the window. Required for `token_window` rules.
    pub window_size: Option<usize>,
    /// Punctuation tokens glued onto their predecessor when building window text.
    pub joiners: Vec<String>,
    /// If true, the pattern must match the entire token (or window) text.
    pub anchored: bool,
    pub case_insensitive: bool,
    /// If true, matches must also pass a programmatic check (e.g., a checksum).
    pub programmatic_validation: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// If true, the rule is disabled unless explicitly enabled.
    pub opt_in: bool,
    pub severity: Option<String>,
    pub tags: Option<Vec<String>>,
    pub version: String,
    pub author: String,
}

impl Default for RedactionRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            kind: RuleKind::SingleToken,
            pattern: None,
            window_size: None,
            joiners: Vec::new(),
            anchored: true,
            case_insensitive: false,
            programmatic_validation: false,
            enabled: None,
            opt_in: false,
            severity: None,
            tags: None,
            version: "1.0.0".to_string(),
            author: "Veridion".to_string(),
        }
    }
}

impl RedactionRule {
    /// Convenience constructor for a single-token rule.
    pub fn single_token(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    /// Convenience constructor for a token-window rule.
    pub fn token_window(name: impl Into<String>, window_size: usize, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RuleKind::TokenWindow,
            window_size: Some(window_size),
            pattern: Some(pattern.into()),
            ..Default::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// The ordered rule set. Declaration order is evaluation order.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RedactionConfig {
    pub rules: Vec<RedactionRule>,
}

impl RedactionConfig {
    /// Loads and validates rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ShieldError> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| {
            ShieldError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_yaml_str(&text).map_err(|e| match e {
            ShieldError::ConfigurationError(msg) => {
                ShieldError::config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());
        Ok(config)
    }

    /// Parses and validates rules from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ShieldError> {
        let config: RedactionConfig = serde_yml::from_str(yaml)
            .map_err(|e| ShieldError::config(format!("Failed to parse rule YAML: {}", e)))?;
        validate_rules(&config.rules)?;
        Ok(config)
    }

    /// Loads the built-in rule set.
    pub fn load_default_rules() -> Result<Self, ShieldError> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config = Self::from_yaml_str(default_yaml)?;
        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Filters active rules based on enable/disable lists provided by the caller.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable_rules` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        self.rules.retain(|rule| {
            let rule_name_str = rule.name.as_str();
            !disable_set.contains(rule_name_str) && (!rule.opt_in || enable_set.contains(rule_name_str))
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Merges user-defined rules with defaults.
///
/// A user rule with the same name replaces the default in place, so the
/// default declaration order survives. New user rules are appended in the
/// order the user declared them.
pub fn merge_rules(default_config: RedactionConfig, user_config: Option<RedactionConfig>) -> RedactionConfig {
    debug!("merge_rules called. Initial default rules count: {}", default_config.rules.len());

    let mut final_rules = default_config.rules;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
                Some(existing) => {
                    debug!("User rule '{}' overrides the default.", user_rule.name);
                    *existing = user_rule;
                }
                None => final_rules.push(user_rule),
            }
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());
    RedactionConfig { rules: final_rules }
}

/// Validates every rule declaration, collecting all problems into one error.
pub fn validate_rules(rules: &[RedactionRule]) -> Result<(), ShieldError> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        match rule.kind {
            RuleKind::TokenWindow => match rule.window_size {
                None => errors.push(format!("Rule '{}' is a token_window rule without a `window_size`.", rule.name)),
                Some(0) => errors.push(format!("Rule '{}' has a non-positive `window_size` (0).", rule.name)),
                Some(_) => {}
            },
            RuleKind::SingleToken => {
                if rule.window_size.is_some() {
                    warn!("Rule '{}' is single_token; its `window_size` is ignored.", rule.name);
                }
            }
        }

        if rule.joiners.iter().any(|j| j.trim().is_empty()) {
            errors.push(format!("Rule '{}' declares an empty joiner.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) => p,
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        if let Err(e) = Regex::new(pattern) {
            errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
        }
    }

    if !errors.is_empty() {
        Err(ShieldError::config(format!("Rule validation failed:\n{}", errors.join("\n"))))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_declaration_order() {
        let config = RedactionConfig::load_default_rules().unwrap();
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["NATIONAL_ID", "TAX_ID", "PERSON_NAME"]);

        let name_rule = &config.rules[2];
        assert_eq!(name_rule.kind, RuleKind::TokenWindow);
        assert_eq!(name_rule.window_size, Some(3));
        assert_eq!(name_rule.joiners, vec![":".to_string()]);
        assert!(name_rule.anchored);
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let rules = vec![RedactionRule::token_window("W", 0, "a b")];
        let err = validate_rules(&rules).unwrap_err();
        assert!(matches!(err, ShieldError::ConfigurationError(_)));
        assert!(err.to_string().contains("non-positive"));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let rules = vec![
            RedactionRule::single_token("A", "("),
            RedactionRule::single_token("A", "ok"),
            RedactionRule { name: "B".into(), ..Default::default() },
        ];
        let msg = validate_rules(&rules).unwrap_err().to_string();
        assert!(msg.contains("invalid regex"));
        assert!(msg.contains("Duplicate rule name"));
        assert!(msg.contains("missing the `pattern`"));
    }

    #[test]
    fn test_validate_rejects_long_pattern_and_empty_joiner() {
        let mut rule = RedactionRule::token_window("W", 2, "x".repeat(MAX_PATTERN_LENGTH + 1));
        rule.joiners = vec![" ".into()];
        let msg = validate_rules(&[rule]).unwrap_err().to_string();
        assert!(msg.contains("exceeds maximum"));
        assert!(msg.contains("empty joiner"));
    }

    #[test]
    fn test_merge_preserves_default_order() {
        let defaults = RedactionConfig {
            rules: vec![
                RedactionRule::single_token("A", "a"),
                RedactionRule::single_token("B", "b"),
            ],
        };
        let user = RedactionConfig {
            rules: vec![
                RedactionRule::single_token("C", "c"),
                RedactionRule::single_token("A", "aa"),
            ],
        };
        let merged = merge_rules(defaults, Some(user));
        let names: Vec<&str> = merged.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(merged.rules[0].pattern.as_deref(), Some("aa"));
    }

    #[test]
    fn test_set_active_rules_respects_opt_in() {
        let mut opt_in = RedactionRule::single_token("OPT", "x");
        opt_in.opt_in = true;
        let mut config = RedactionConfig {
            rules: vec![
                RedactionRule::single_token("A", "a"),
                RedactionRule::single_token("B", "b"),
                opt_in,
            ],
        };
        config.set_active_rules(&["OPT".to_string()], &["B".to_string(), "NOPE".to_string()]);
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "OPT"]);
    }
}
