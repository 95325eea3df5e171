//! Category entity model
//!
//! A category is the unit of scoring: demographic bands, disease (HCC)
//! categories, disease-count categories and disease-interaction categories
//! all carry a coefficient and contribute to the final score. `ScoredCategory`
//! additionally carries the provenance needed for audit: which diagnosis
//! codes produced it and which categories it suppressed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a scoring category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryType {
    /// Age/gender demographic band
    Demographic,
    /// Synthesized from demographic flags (e.g. originally disabled)
    DemographicInteraction,
    /// Disease (HCC) category mapped from diagnosis codes
    Disease,
    /// Synthesized from the number of surviving disease categories
    DiseaseCount,
    /// Synthesized from the co-occurrence of disease categories
    DiseaseInteraction,
}

impl CategoryType {
    /// Whether this kind contributes to the disease sub-total
    #[must_use]
    pub const fn is_disease(self) -> bool {
        matches!(
            self,
            Self::Disease | Self::DiseaseCount | Self::DiseaseInteraction
        )
    }

    /// Whether this kind contributes to the demographic sub-total
    #[must_use]
    pub const fn is_demographic(self) -> bool {
        matches!(self, Self::Demographic | Self::DemographicInteraction)
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Demographic => "demographic",
            Self::DemographicInteraction => "demographic_interaction",
            Self::Disease => "disease",
            Self::DiseaseCount => "disease_count",
            Self::DiseaseInteraction => "disease_interaction",
        };
        f.write_str(label)
    }
}

/// A category resolved for one beneficiary, with coefficient and provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCategory {
    /// Category id, e.g. "HCC18", "M70_74", "DIABETES_CHF", "D3"
    pub id: String,
    /// Kind of category
    pub kind: CategoryType,
    /// Coefficient for the risk-model population
    pub coefficient: f64,
    /// Diagnosis codes that produced this category, in first-seen order.
    /// Empty for demographic and synthesized categories.
    pub source_diagnoses: Vec<String>,
    /// Categories this one suppressed via hierarchy, if any
    pub dropped_categories: Option<Vec<String>>,
    /// CMS category number (verbose output only)
    pub number: Option<u32>,
    /// Human-readable description (verbose output only)
    pub description: Option<String>,
}

/// Per-category entry in the scoring result's detail map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetail {
    /// Coefficient contributed by this category
    pub coefficient: f64,
    /// Diagnosis codes mapped to this category, or `None` for derived ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis_map: Option<Vec<String>>,
    /// Categories suppressed by this one, or `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_categories: Option<Vec<String>>,
    /// Kind of category (verbose mode only)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryType>,
    /// CMS category number (verbose mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_number: Option<u32>,
    /// Description (verbose mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_description: Option<String>,
}

impl CategoryDetail {
    /// Build the detail entry for a scored category.
    ///
    /// Verbose mode carries the category metadata; trimmed mode keeps only
    /// the coefficient and the provenance lists.
    #[must_use]
    pub fn from_category(category: &ScoredCategory, verbose: bool) -> Self {
        let diagnosis_map = if category.source_diagnoses.is_empty() {
            None
        } else {
            Some(category.source_diagnoses.clone())
        };
        Self {
            coefficient: category.coefficient,
            diagnosis_map,
            dropped_categories: category.dropped_categories.clone(),
            kind: verbose.then_some(category.kind),
            category_number: if verbose { category.number } else { None },
            category_description: if verbose {
                category.description.clone()
            } else {
                None
            },
        }
    }
}
