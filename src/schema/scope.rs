//! Scope table: which node ids a lineage may pass through for a given target.
//!
//! The dataset mixes several overlapping universes, so a lineage for e.g.
//! `Runner` must not wander into the proto-form branch through a shared host.
//! Each rule names the targets it applies to and the ids they may traverse;
//! targets without a rule traverse everything.
//!
//! JSON shape:
//! { "rules": [{ "category": "classic", "targets": ["Runner"], "allow": ["Dog", "Runner"] }] }

use crate::Result;
use crate::diagnostics;

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const BUILTIN_SCOPES: &str = include_str!("../../config/scopes.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeTable {
    #[serde(default)]
    pub rules: Vec<ScopeRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScopeRule {
    /// Free-form grouping label ("classic", "pathogen", ...).
    #[serde(default)]
    pub category: String,
    pub targets: Vec<String>,
    #[serde(default)]
    pub allow: BTreeSet<String>,
}

/// Membership test applied to both endpoints of every traversed edge.
#[derive(Debug, Clone, Copy)]
pub enum AllowPredicate<'a> {
    Everything,
    Only(&'a BTreeSet<String>),
}

impl AllowPredicate<'_> {
    pub fn allows(&self, id: &str) -> bool {
        match self {
            AllowPredicate::Everything => true,
            AllowPredicate::Only(set) => set.contains(id),
        }
    }
}

impl ScopeTable {
    /// The curated table shipped with the crate.
    pub fn builtin() -> Result<ScopeTable> {
        Self::parse(BUILTIN_SCOPES).context(diagnostics::error_message("built-in scope table"))
    }

    /// Load a replacement table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<ScopeTable> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| {
            diagnostics::error_message(format!("read scope table {}", path.display()))
        })?;
        Self::parse(&text)
            .with_context(|| diagnostics::error_message(format!("scope table {}", path.display())))
    }

    /// Builtin table unless a path is given.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<ScopeTable> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::builtin(),
        }
    }

    pub fn parse(text: &str) -> Result<ScopeTable> {
        let table: ScopeTable = serde_json::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    /// Every rule names a target; no target belongs to two rules.
    pub fn validate(&self) -> Result<()> {
        let mut owner: BTreeMap<&str, usize> = BTreeMap::new();
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.targets.is_empty() {
                bail!(
                    "{}",
                    diagnostics::error_message(format!(
                        "scope rule #{} ({}) lists no targets",
                        i, rule.category
                    ))
                );
            }
            for t in &rule.targets {
                if let Some(prev) = owner.insert(t.as_str(), i) {
                    bail!(
                        "{}",
                        diagnostics::error_message(format!(
                            "target '{}' appears in scope rules #{} and #{}",
                            t, prev, i
                        ))
                    );
                }
            }
        }
        Ok(())
    }

    pub fn rule_for(&self, target: &str) -> Option<&ScopeRule> {
        self.rules
            .iter()
            .find(|r| r.targets.iter().any(|t| t == target))
    }

    pub fn predicate_for(&self, target: &str) -> AllowPredicate<'_> {
        match self.rule_for(target) {
            Some(rule) => AllowPredicate::Only(&rule.allow),
            None => AllowPredicate::Everything,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_table_parses_and_covers_curated_targets() {
        let table = ScopeTable::builtin().unwrap();
        for t in [
            "Cloned Queen (human DNA)",
            "Runner",
            "Queen",
            "Drone",
            "Warrior",
            "Protomorph",
            "Newborn",
            "Neomorph",
            "Deacon",
            "Trilobite",
            "Hammerpede",
            "Offspring",
        ] {
            assert!(table.rule_for(t).is_some(), "no rule for {}", t);
        }
        assert!(table.rule_for("Xenomorph Hybrid").is_none());
    }

    #[test]
    fn drone_and_warrior_share_the_classic_set() {
        let table = ScopeTable::builtin().unwrap();
        let drone = table.rule_for("Drone").unwrap();
        let warrior = table.rule_for("Warrior").unwrap();
        assert_eq!(drone.allow, warrior.allow);
        assert_eq!(drone.category, "classic");
        assert!(drone.allow.contains("Implantation: Facehugger + Human"));
        assert!(!drone.allow.contains("Dog"));
    }

    #[test]
    fn unknown_target_allows_everything() {
        let table = ScopeTable::builtin().unwrap();
        let p = table.predicate_for("Something Else");
        assert!(p.allows("anything at all"));
        let p = table.predicate_for("Hammerpede");
        assert!(p.allows("Worms"));
        assert!(!p.allows("Human"));
    }

    #[test]
    fn target_in_two_rules_is_rejected() {
        let err = ScopeTable::parse(
            r#"{ "rules": [
                { "category": "a", "targets": ["X"], "allow": ["X"] },
                { "category": "b", "targets": ["Y", "X"], "allow": ["X"] }
            ] }"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "lineage-viz: target 'X' appears in scope rules #0 and #1"
        );
    }

    #[test]
    fn rule_without_targets_is_rejected() {
        assert!(ScopeTable::parse(r#"{ "rules": [{ "targets": [], "allow": [] }] }"#).is_err());
    }
}
