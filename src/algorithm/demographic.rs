//! Demographic categorizer
//!
//! Resolves a beneficiary to exactly one demographic band category, plus any
//! demographic interaction categories the rule set defines (for example the
//! originally-disabled factors). Band selection is a first-match scan over
//! the rule set's ordered band table for the beneficiary's population family.

use crate::error::{Result, ScoringError};
use crate::models::beneficiary::MedicareBeneficiary;
use crate::ruleset::RuleSet;

/// Sanity ceiling on ages accepted by the categorizer
pub const MAX_AGE: u32 = 125;

/// Output of the demographic categorizer
#[derive(Debug, Clone)]
pub struct DemographicCategories {
    /// The single age/gender band category id
    pub band_category: String,
    /// Demographic interaction category ids, in rule order
    pub interaction_categories: Vec<String>,
}

/// Resolve the demographic categories for a beneficiary.
///
/// The category id is the population-family prefix ("NE" for new enrollees,
/// nothing otherwise), the gender code and the matched band label.
pub fn determine_demographic_categories(
    rules: &RuleSet,
    beneficiary: &MedicareBeneficiary,
) -> Result<DemographicCategories> {
    let age = beneficiary.risk_model_age;
    if age > MAX_AGE {
        return Err(ScoringError::InvalidAge(format!(
            "age {age} exceeds the supported maximum of {MAX_AGE}"
        )));
    }

    let new_enrollee = beneficiary.population.is_new_enrollee();
    let bands = if new_enrollee {
        &rules.new_enrollee_bands
    } else {
        &rules.standard_bands
    };
    let label = bands.band_for(age).ok_or_else(|| {
        ScoringError::InvalidAge(format!(
            "age {age} matches no {} band in the {} rule set",
            if new_enrollee { "new-enrollee" } else { "standard" },
            rules.version
        ))
    })?;

    let prefix = if new_enrollee { "NE" } else { "" };
    let band_category = format!("{prefix}{}{label}", beneficiary.gender.as_str());

    let interaction_categories = rules
        .demographic_interactions
        .iter()
        .filter(|rule| {
            rule.gender.is_none_or(|g| g == beneficiary.gender)
                && (!rule.requires_originally_disabled || beneficiary.originally_disabled)
                && (!rule.requires_medicaid || beneficiary.medicaid)
        })
        .map(|rule| rule.id.clone())
        .collect();

    Ok(DemographicCategories {
        band_category,
        interaction_categories,
    })
}
