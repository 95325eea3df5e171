//! Hierarchy resolver
//!
//! Applies the rule set's exclusion map to the raw mapped category set:
//! a more severe category's presence nullifies the related less-severe
//! categories it dominates. Resolution runs to a fixed point, and only
//! categories that remain present at the fixed point keep their suppression
//! effect. A dominator that is itself dropped by a higher category loses its
//! own drops, so in a chain A over B over C the final set is A and C, with B
//! recorded as dropped under A.
//!
//! This stage is pure set algebra over the exclusion map; it performs no
//! diagnosis lookups and never invents categories.

use crate::ruleset::RuleSet;
use rustc_hash::{FxHashMap, FxHashSet};

/// Resolution status of one category during the fixed-point loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Unknown,
    Kept,
    Dropped,
}

/// Output of hierarchy resolution
#[derive(Debug, Clone)]
pub struct HierarchyOutcome {
    /// Surviving category ids, in input order
    pub survivors: Vec<String>,
    /// Surviving category id to the categories it suppressed
    pub dropped: FxHashMap<String, Vec<String>>,
}

impl HierarchyOutcome {
    /// Categories a surviving category suppressed, if any
    #[must_use]
    pub fn dropped_by(&self, category: &str) -> Option<&[String]> {
        self.dropped.get(category).map(Vec::as_slice)
    }
}

/// Resolve hierarchies over the raw mapped category set.
///
/// Companion requirements are applied first: a category whose required
/// companions are all absent is removed outright, before any suppression,
/// and is not recorded as dropped by anything.
#[must_use]
pub fn resolve_hierarchies(rules: &RuleSet, categories: &[String]) -> HierarchyOutcome {
    let initial: FxHashSet<&str> = categories.iter().map(String::as_str).collect();

    // Companion filter, evaluated against the unfiltered set
    let present: Vec<&str> = categories
        .iter()
        .map(String::as_str)
        .filter(|category| {
            rules
                .companion_requirements
                .get(*category)
                .is_none_or(|companions| companions.iter().any(|c| initial.contains(c.as_str())))
        })
        .collect();
    let present_set: FxHashSet<&str> = present.iter().copied().collect();

    // Present dominators per present category
    let mut dominators: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for dominator in &present {
        if let Some(targets) = rules.hierarchies.get(*dominator) {
            for target in targets {
                if target != dominator && present_set.contains(target.as_str()) {
                    dominators.entry(target.as_str()).or_default().push(dominator);
                }
            }
        }
    }

    // Level-wise resolution: a category is dropped when any dominator is
    // kept, and kept once every dominator is known to be dropped. Each pass
    // settles one level of a chain, so the pass count is bounded by the
    // longest chain, itself bounded by the category count.
    let mut status: FxHashMap<&str, Status> = present
        .iter()
        .map(|category| (*category, Status::Unknown))
        .collect();
    for _ in 0..=present.len() {
        let mut changed = false;
        for category in &present {
            if status[category] != Status::Unknown {
                continue;
            }
            let next = match dominators.get(category) {
                None => Status::Kept,
                Some(doms) => {
                    if doms.iter().any(|d| status[d] == Status::Kept) {
                        Status::Dropped
                    } else if doms.iter().all(|d| status[d] == Status::Dropped) {
                        Status::Kept
                    } else {
                        Status::Unknown
                    }
                }
            };
            if next != Status::Unknown {
                status.insert(category, next);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    // Mutual-domination cycles never settle above; resolve them in input
    // order, first category wins.
    for category in &present {
        if status[category] == Status::Unknown {
            let kept_dominator = dominators
                .get(category)
                .is_some_and(|doms| doms.iter().any(|d| status[d] == Status::Kept));
            status.insert(
                category,
                if kept_dominator { Status::Dropped } else { Status::Kept },
            );
        }
    }

    let survivors: Vec<String> = present
        .iter()
        .filter(|category| status[*category] == Status::Kept)
        .map(ToString::to_string)
        .collect();

    let mut dropped: FxHashMap<String, Vec<String>> = FxHashMap::default();
    for survivor in &survivors {
        if let Some(targets) = rules.hierarchies.get(survivor.as_str()) {
            let suppressed: Vec<String> = targets
                .iter()
                .filter(|t| {
                    present_set.contains(t.as_str()) && status[t.as_str()] == Status::Dropped
                })
                .cloned()
                .collect();
            if !suppressed.is_empty() {
                dropped.insert(survivor.clone(), suppressed);
            }
        }
    }

    HierarchyOutcome { survivors, dropped }
}
