//! Disease-count and disease-interaction engine
//!
//! Synthesizes derived categories from the post-hierarchy survivors: exactly
//! one disease-count category for the bucket containing the survivor count,
//! and one category per satisfied interaction rule. Interactions never
//! suppress their constituents, and zero-weight results are never filtered;
//! a valid but non-contributing category stays visible for audit.

use crate::ruleset::RuleSet;
use rustc_hash::FxHashSet;

/// Count category for the surviving disease categories, if the rule set
/// defines a bucket for this count.
#[must_use]
pub fn count_category(rules: &RuleSet, survivors: &[String]) -> Option<String> {
    let count = u32::try_from(survivors.len()).unwrap_or(u32::MAX);
    rules.count_category_for(count).map(ToString::to_string)
}

/// Interaction categories for the surviving disease set, in rule order.
///
/// Rules are conjunctions over the post-hierarchy survivors plus the
/// beneficiary's disabled flag; every satisfied rule fires independently.
#[must_use]
pub fn interaction_categories(
    rules: &RuleSet,
    survivors: &[String],
    disabled: bool,
) -> Vec<String> {
    let present: FxHashSet<&str> = survivors.iter().map(String::as_str).collect();
    rules
        .interactions
        .iter()
        .filter(|rule| rule.is_satisfied(|id| present.contains(id), disabled))
        .map(|rule| rule.id.clone())
        .collect()
}
