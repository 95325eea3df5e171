//! Model-version rule sets
//!
//! A `RuleSet` is the read-only configuration object one engine instance is
//! built around: diagnosis-to-category map, hierarchy exclusions, demographic
//! bands, interaction rules, coefficient tables and the two scale factors,
//! all scoped to one model version and payment year. The pipeline itself is
//! identical across versions; each version/year is a data instance of this
//! type, never a new code path.
//!
//! Rule sets are loaded (or built) once, then shared read-only across calls,
//! which is what makes concurrent scoring against one instance safe.

pub mod bands;
pub mod provider;

use crate::error::{Result, ScoringError};
use crate::models::beneficiary::Gender;
use crate::models::category::CategoryType;
use bands::AgeBands;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Static metadata for one category id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Kind of the category
    #[serde(rename = "type")]
    pub kind: CategoryType,
    /// CMS category number, where one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A demographic age/sex edit applied during diagnosis mapping
///
/// When a listed code is seen and every present condition holds, the edit's
/// categories replace whatever the diagnosis map would have produced. An
/// empty replacement list voids the code entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeSexEdit {
    /// Normalized diagnosis codes this edit targets
    pub codes: Vec<String>,
    /// Required gender, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Inclusive minimum age, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    /// Inclusive maximum age, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    /// Replacement categories; empty means the code maps to nothing
    pub categories: Vec<String>,
}

impl AgeSexEdit {
    /// Whether this edit applies to the given code and demographics
    #[must_use]
    pub fn applies(&self, code: &str, gender: Gender, age: u32) -> bool {
        self.codes.iter().any(|c| c == code)
            && self.gender.is_none_or(|g| g == gender)
            && self.min_age.is_none_or(|min| age >= min)
            && self.max_age.is_none_or(|max| age <= max)
    }
}

/// A disease-interaction rule: a conjunction of category groups
///
/// The rule fires when every group has at least one member among the
/// post-hierarchy survivors (and the disabled flag holds, if required),
/// yielding one derived category. Interactions never suppress their
/// constituent categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRule {
    /// Id of the derived category, e.g. "DIABETES_CHF"
    pub id: String,
    /// Groups of category ids; each group must be hit by at least one survivor
    pub all_of: Vec<Vec<String>>,
    /// Whether the beneficiary must be currently disabled
    #[serde(default)]
    pub requires_disabled: bool,
}

impl InteractionRule {
    /// Evaluate the rule against the surviving category set
    #[must_use]
    pub fn is_satisfied<F: Fn(&str) -> bool>(&self, present: F, disabled: bool) -> bool {
        if self.requires_disabled && !disabled {
            return false;
        }
        self.all_of
            .iter()
            .all(|group| group.iter().any(|id| present(id)))
    }
}

/// A demographic interaction rule evaluated on beneficiary flags alone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicInteraction {
    /// Id of the derived category, e.g. "OriginallyDisabled_Male"
    pub id: String,
    /// Required gender, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Whether the beneficiary must be originally disabled
    #[serde(default)]
    pub requires_originally_disabled: bool,
    /// Whether the beneficiary must be Medicaid (dual-eligible)
    #[serde(default)]
    pub requires_medicaid: bool,
}

/// One disease-count bucket, e.g. D3 for exactly three surviving categories
/// or D10P for ten or more
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountBucket {
    /// Id of the count category
    pub label: String,
    /// Inclusive lower bound on the surviving disease-category count
    pub lower: u32,
    /// Inclusive upper bound; `None` for the open-ended final bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<u32>,
}

/// Read-only rule tables for one model version and payment year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    /// Model version label, e.g. "v24"
    pub version: String,
    /// Payment year these tables are scoped to
    pub model_year: u16,
    /// Age bands for the standard (non-new-enrollee) population families
    pub standard_bands: AgeBands,
    /// Age bands for new-enrollee populations (single-year below 70)
    pub new_enrollee_bands: AgeBands,
    /// Diagnosis code to category ids; one code may map to several
    pub diagnosis_map: FxHashMap<String, Vec<String>>,
    /// Age/sex edits applied during mapping, in order; first match wins
    #[serde(default)]
    pub age_sex_edits: Vec<AgeSexEdit>,
    /// Category id to the category ids it suppresses
    pub hierarchies: FxHashMap<String, Vec<String>>,
    /// Category id to companions, at least one of which must also be present
    /// for the category to score at all (e.g. the v28 HCC223 constraint)
    #[serde(default)]
    pub companion_requirements: FxHashMap<String, Vec<String>>,
    /// Metadata for every category id the pipeline may emit
    pub category_definitions: FxHashMap<String, CategoryInfo>,
    /// Coefficients keyed by category id, then risk-model population
    pub coefficients: FxHashMap<String, FxHashMap<String, f64>>,
    /// Disease-count buckets; empty disables count categories
    #[serde(default)]
    pub count_buckets: Vec<CountBucket>,
    /// Disease-interaction rules, evaluated in order
    #[serde(default)]
    pub interactions: Vec<InteractionRule>,
    /// Demographic interaction rules, evaluated in order
    #[serde(default)]
    pub demographic_interactions: Vec<DemographicInteraction>,
    /// Model-year-wide coding-intensity factor
    pub coding_intensity_adjuster: f64,
    /// Model-version/year normalization factor
    pub normalization_factor: f64,
}

impl RuleSet {
    /// Categories a normalized diagnosis code maps to, if any
    #[must_use]
    pub fn categories_for_code(&self, code: &str) -> Option<&[String]> {
        self.diagnosis_map.get(code).map(Vec::as_slice)
    }

    /// Metadata for a category id; missing metadata is a rule-set defect
    pub fn category_info(&self, category: &str) -> Result<&CategoryInfo> {
        self.category_definitions
            .get(category)
            .ok_or_else(|| ScoringError::UnknownCategory {
                category: category.to_string(),
                version: self.version.clone(),
            })
    }

    /// Coefficient for a category under the given risk-model population.
    ///
    /// A missing category row means the rule set and pipeline disagree and is
    /// fatal; so is a missing population column. Never silently zeroed.
    pub fn coefficient(&self, category: &str, population: &str) -> Result<f64> {
        let row = self
            .coefficients
            .get(category)
            .ok_or_else(|| ScoringError::UnknownCategory {
                category: category.to_string(),
                version: self.version.clone(),
            })?;
        row.get(population)
            .copied()
            .ok_or_else(|| ScoringError::UnknownPopulation {
                population: population.to_string(),
                category: category.to_string(),
            })
    }

    /// Count category for the given surviving disease-category count
    #[must_use]
    pub fn count_category_for(&self, count: u32) -> Option<&str> {
        self.count_buckets
            .iter()
            .find(|bucket| count >= bucket.lower && bucket.upper.is_none_or(|u| count <= u))
            .map(|bucket| bucket.label.as_str())
    }

    /// Deserialize a rule set from JSON produced by an external loader
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ScoringError::InvalidInput(format!("malformed rule set JSON: {e}")))
    }
}

/// Fluent builder for constructing rule sets programmatically
#[derive(Debug)]
pub struct RuleSetBuilder {
    rules: RuleSet,
}

impl RuleSetBuilder {
    /// Start a rule set for the given version and payment year.
    ///
    /// Bands default to the CMS community/new-enrollee layouts shared by
    /// v24 and v28; both factors default to 1.0.
    #[must_use]
    pub fn new(version: &str, model_year: u16) -> Self {
        let standard_bands = AgeBands::from_labels(&[
            "0_34", "35_44", "45_54", "55_59", "60_64", "65_69", "70_74", "75_79", "80_84",
            "85_89", "90_94", "95_GT",
        ])
        .expect("default band labels are valid");
        let new_enrollee_bands = AgeBands::from_labels(&[
            "0_34", "35_44", "45_54", "55_59", "60_64", "65", "66", "67", "68", "69", "70_74",
            "75_79", "80_84", "85_89", "90_94", "95_GT",
        ])
        .expect("default band labels are valid");

        Self {
            rules: RuleSet {
                version: version.to_string(),
                model_year,
                standard_bands,
                new_enrollee_bands,
                diagnosis_map: FxHashMap::default(),
                age_sex_edits: Vec::new(),
                hierarchies: FxHashMap::default(),
                companion_requirements: FxHashMap::default(),
                category_definitions: FxHashMap::default(),
                coefficients: FxHashMap::default(),
                count_buckets: Vec::new(),
                interactions: Vec::new(),
                demographic_interactions: Vec::new(),
                coding_intensity_adjuster: 1.0,
                normalization_factor: 1.0,
            },
        }
    }

    /// Replace the standard age-band table
    #[must_use]
    pub fn standard_bands(mut self, bands: AgeBands) -> Self {
        self.rules.standard_bands = bands;
        self
    }

    /// Replace the new-enrollee age-band table
    #[must_use]
    pub fn new_enrollee_bands(mut self, bands: AgeBands) -> Self {
        self.rules.new_enrollee_bands = bands;
        self
    }

    /// Map a diagnosis code to one or more categories
    #[must_use]
    pub fn diagnosis<S: Into<String>>(mut self, code: &str, categories: Vec<S>) -> Self {
        self.rules
            .diagnosis_map
            .entry(code.to_string())
            .or_default()
            .extend(categories.into_iter().map(Into::into));
        self
    }

    /// Append an age/sex edit rule
    #[must_use]
    pub fn age_sex_edit(mut self, edit: AgeSexEdit) -> Self {
        self.rules.age_sex_edits.push(edit);
        self
    }

    /// Declare that `category` suppresses the given categories
    #[must_use]
    pub fn hierarchy<S: Into<String>>(mut self, category: &str, drops: Vec<S>) -> Self {
        self.rules
            .hierarchies
            .entry(category.to_string())
            .or_default()
            .extend(drops.into_iter().map(Into::into));
        self
    }

    /// Require at least one companion category for `category` to score
    #[must_use]
    pub fn companion_requirement<S: Into<String>>(
        mut self,
        category: &str,
        companions: Vec<S>,
    ) -> Self {
        self.rules.companion_requirements.insert(
            category.to_string(),
            companions.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Define a category's metadata
    #[must_use]
    pub fn category(
        mut self,
        id: &str,
        kind: CategoryType,
        number: Option<u32>,
        description: Option<&str>,
    ) -> Self {
        self.rules.category_definitions.insert(
            id.to_string(),
            CategoryInfo {
                kind,
                number,
                description: description.map(ToString::to_string),
            },
        );
        self
    }

    /// Set a coefficient for a category under one population
    #[must_use]
    pub fn coefficient(mut self, category: &str, population: &str, weight: f64) -> Self {
        self.rules
            .coefficients
            .entry(category.to_string())
            .or_default()
            .insert(population.to_string(), weight);
        self
    }

    /// Append a disease-count bucket
    #[must_use]
    pub fn count_bucket(mut self, label: &str, lower: u32, upper: Option<u32>) -> Self {
        self.rules.count_buckets.push(CountBucket {
            label: label.to_string(),
            lower,
            upper,
        });
        self
    }

    /// Append a disease-interaction rule
    #[must_use]
    pub fn interaction(mut self, rule: InteractionRule) -> Self {
        self.rules.interactions.push(rule);
        self
    }

    /// Append a demographic interaction rule
    #[must_use]
    pub fn demographic_interaction(mut self, rule: DemographicInteraction) -> Self {
        self.rules.demographic_interactions.push(rule);
        self
    }

    /// Set the coding-intensity factor
    #[must_use]
    pub fn coding_intensity_adjuster(mut self, factor: f64) -> Self {
        self.rules.coding_intensity_adjuster = factor;
        self
    }

    /// Set the normalization factor
    #[must_use]
    pub fn normalization_factor(mut self, factor: f64) -> Self {
        self.rules.normalization_factor = factor;
        self
    }

    /// Finish the rule set
    pub fn build(self) -> Result<RuleSet> {
        if self.rules.version.is_empty() {
            return Err(ScoringError::InvalidInput(
                "rule set version must not be empty".to_string(),
            ));
        }
        Ok(self.rules)
    }
}
