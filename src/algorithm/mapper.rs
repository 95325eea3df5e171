//! Diagnosis-to-category mapper
//!
//! Turns the raw diagnosis code list into a map from category id to the
//! ordered, deduplicated list of codes that produced it. Codes are
//! normalized before lookup; malformed codes are recorded and skipped, and
//! codes unknown to the model contribute nothing. Both outcomes are silent
//! by design: CMS models use zero-weight placeholder categories for
//! non-scoring codes, so "unknown code" and "zero-weight category" must stay
//! distinguishable in the output.

use crate::models::beneficiary::MedicareBeneficiary;
use crate::ruleset::RuleSet;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Placeholder category id meaning "maps to nothing" in CMS reference data
const NON_SCORING: &str = "NA";

/// One mapped category with its contributing codes in first-seen order
#[derive(Debug, Clone)]
pub struct MappedCategory {
    /// Category id
    pub id: String,
    /// Normalized diagnosis codes, deduplicated, first-seen order
    pub codes: SmallVec<[String; 4]>,
}

/// Output of the diagnosis mapper
#[derive(Debug, Clone, Default)]
pub struct MappedDiagnoses {
    /// Mapped categories in first-seen order
    pub categories: Vec<MappedCategory>,
    /// Input codes that failed format validation, as supplied
    pub malformed_codes: Vec<String>,
}

impl MappedDiagnoses {
    /// Ids of all mapped categories, in first-seen order
    #[must_use]
    pub fn category_ids(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }

    /// Codes recorded for one category, if it was mapped
    #[must_use]
    pub fn codes_for(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.id == category)
            .map(|c| c.codes.as_slice())
    }
}

/// Normalize a raw diagnosis code: trim, uppercase, strip the decimal point
#[must_use]
pub fn normalize_code(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| *c != '.')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Whether a normalized code has a plausible ICD-10 shape:
/// three to seven alphanumeric characters with a leading letter
#[must_use]
pub fn is_valid_code(code: &str) -> bool {
    (3..=7).contains(&code.len())
        && code.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Map a list of diagnosis codes to categories for one beneficiary.
///
/// Age/sex edits run per code before the result is recorded: the first
/// matching edit replaces the mapped categories outright (an empty
/// replacement voids the code). Duplicate input codes are mapped once.
#[must_use]
pub fn map_diagnoses(
    rules: &RuleSet,
    beneficiary: &MedicareBeneficiary,
    diagnosis_codes: &[String],
) -> MappedDiagnoses {
    let mut result = MappedDiagnoses::default();
    let mut seen_codes: FxHashSet<String> = FxHashSet::default();
    let mut category_index: FxHashMap<String, usize> = FxHashMap::default();

    for raw in diagnosis_codes {
        let code = normalize_code(raw);
        if !is_valid_code(&code) {
            debug!("skipping malformed diagnosis code '{raw}'");
            result.malformed_codes.push(raw.clone());
            continue;
        }
        if !seen_codes.insert(code.clone()) {
            continue;
        }

        let edited: Option<&[String]> = rules
            .age_sex_edits
            .iter()
            .find(|edit| edit.applies(&code, beneficiary.gender, beneficiary.risk_model_age))
            .map(|edit| edit.categories.as_slice());
        let categories = match edited {
            Some(replacement) => replacement,
            None => rules.categories_for_code(&code).unwrap_or(&[]),
        };

        for category in categories {
            if category == NON_SCORING {
                continue;
            }
            let slot = *category_index.entry(category.clone()).or_insert_with(|| {
                result.categories.push(MappedCategory {
                    id: category.clone(),
                    codes: SmallVec::new(),
                });
                result.categories.len() - 1
            });
            let entry = &mut result.categories[slot];
            if !entry.codes.iter().any(|c| c == &code) {
                entry.codes.push(code.clone());
            }
        }
    }

    result
}
