//! Rule-set providers
//!
//! The engine never reads reference data from disk itself; an external
//! collaborator hands it frozen `RuleSet` values through this interface.
//! `StaticRuleSetProvider` is the in-memory registry used in practice: rule
//! sets are registered once at startup and shared read-only afterwards.

use crate::error::{Result, ScoringError};
use crate::ruleset::RuleSet;
use log::warn;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Source of immutable rule sets keyed by model version and year
pub trait RuleSetProvider {
    /// Rule set for the given version and, optionally, payment year.
    ///
    /// When the requested year is unavailable the provider falls back to the
    /// latest year it has for that version; callers learn the year actually
    /// used from the returned rule set's `model_year`.
    fn rule_set(&self, version: &str, year: Option<u16>) -> Result<Arc<RuleSet>>;
}

/// In-memory provider over a fixed registry of rule sets
#[derive(Debug, Default)]
pub struct StaticRuleSetProvider {
    by_version: FxHashMap<String, BTreeMap<u16, Arc<RuleSet>>>,
}

impl StaticRuleSetProvider {
    /// Create an empty provider
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule set under its own version and model year
    pub fn register(&mut self, rules: Arc<RuleSet>) {
        self.by_version
            .entry(rules.version.clone())
            .or_default()
            .insert(rules.model_year, rules);
    }

    /// Versions currently registered
    #[must_use]
    pub fn versions(&self) -> Vec<&str> {
        self.by_version.keys().map(String::as_str).collect()
    }
}

impl RuleSetProvider for StaticRuleSetProvider {
    fn rule_set(&self, version: &str, year: Option<u16>) -> Result<Arc<RuleSet>> {
        let years = self
            .by_version
            .get(version)
            .ok_or_else(|| ScoringError::UnsupportedYear {
                version: version.to_string(),
            })?;

        if let Some(year) = year {
            if let Some(rules) = years.get(&year) {
                return Ok(Arc::clone(rules));
            }
        }

        // Latest available year; degrade with a warning when the caller
        // asked for a specific one.
        let (latest_year, rules) =
            years
                .last_key_value()
                .ok_or_else(|| ScoringError::UnsupportedYear {
                    version: version.to_string(),
                })?;
        if let Some(requested) = year {
            warn!(
                "no {version} rule set for year {requested}, falling back to {latest_year}"
            );
        }
        Ok(Arc::clone(rules))
    }
}
