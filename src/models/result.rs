//! Scoring result model
//!
//! `ScoringResult` is an immutable snapshot of one scoring call: the echoed
//! inputs, the resolved risk-model demographics, the four score variants and
//! the per-category detail map. Field names are stable across model versions
//! so callers can compare results between versions and years.

use crate::models::category::CategoryDetail;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete, immutable result of one scoring call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Gender as supplied
    pub gender: String,
    /// Original entitlement reason code as supplied
    pub orec: String,
    /// Medicaid (dual-eligible) flag as supplied
    pub medicaid: bool,
    /// Age as supplied, if any
    pub age: Option<u32>,
    /// Date of birth as supplied, if any
    pub dob: Option<NaiveDate>,
    /// Diagnosis codes as supplied, unmodified
    pub diagnosis_codes: Vec<String>,
    /// Codes that failed format validation and were skipped
    pub malformed_codes: Vec<String>,
    /// Year requested by the caller, if any
    pub year: Option<u16>,
    /// Population segment as supplied
    pub population: String,
    /// Age the model actually used
    pub risk_model_age: u32,
    /// Population segment used for coefficient lookup
    pub risk_model_population: String,
    /// Model version of the rule set
    pub model_version: String,
    /// Year of the rule set actually used (may differ from `year`)
    pub model_year: u16,
    /// Coding-intensity factor applied to the raw scores
    pub coding_intensity_adjuster: f64,
    /// Normalization factor applied to the raw scores
    pub normalization_factor: f64,
    /// Sum of all coefficients before adjustment
    pub score_raw: f64,
    /// Sum of disease, disease-count and disease-interaction coefficients
    pub disease_score_raw: f64,
    /// Sum of demographic and demographic-interaction coefficients
    pub demographic_score_raw: f64,
    /// Adjusted total score
    pub score: f64,
    /// Adjusted disease sub-score
    pub disease_score: f64,
    /// Adjusted demographic sub-score
    pub demographic_score: f64,
    /// Final category ids in deterministic order
    pub category_list: Vec<String>,
    /// Per-category coefficients and provenance
    pub category_details: BTreeMap<String, CategoryDetail>,
}

impl ScoringResult {
    /// Inverse index: normalized diagnosis code to the categories it produced.
    ///
    /// Built from the detail map; codes that mapped to nothing do not appear.
    #[must_use]
    pub fn diagnosis_categories(&self) -> BTreeMap<String, Vec<String>> {
        let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (category, detail) in &self.category_details {
            if let Some(codes) = &detail.diagnosis_map {
                for code in codes {
                    index.entry(code.clone()).or_default().push(category.clone());
                }
            }
        }
        index
    }
}
