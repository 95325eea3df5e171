//! Scoring engine entry point
//!
//! `RiskModel` wraps one frozen rule set and exposes `score`, the end-user
//! entry point that runs the full pipeline for one beneficiary, and
//! `score_batch` for embarrassingly parallel batch scoring. The engine is
//! pure and stateless per call: it reads only the shared rule set and its
//! own working state, so one instance can serve many threads without
//! locking.

use crate::algorithm::{
    aggregate, count_category, determine_demographic_categories, interaction_categories,
    map_diagnoses, resolve_hierarchies,
};
use crate::error::Result;
use crate::models::beneficiary::{Gender, MedicareBeneficiary, Orec, Population};
use crate::models::category::{CategoryDetail, ScoredCategory};
use crate::models::result::ScoringResult;
use crate::ruleset::RuleSet;
use crate::ruleset::provider::RuleSetProvider;
use chrono::NaiveDate;
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Inputs for one scoring call
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    /// Beneficiary gender
    pub gender: Gender,
    /// Original entitlement reason code
    pub orec: Orec,
    /// Dual-eligible (Medicaid) flag
    pub medicaid: bool,
    /// Diagnosis codes; duplicates and unknown codes are permitted
    pub diagnosis_codes: Vec<String>,
    /// Beneficiary age; may be omitted when `dob` is given
    pub age: Option<u32>,
    /// Date of birth; may be omitted when `age` is given
    pub dob: Option<NaiveDate>,
    /// Population segment to score under
    pub population: Population,
    /// Whether to include category metadata in the result details
    pub verbose: bool,
}

impl ScoreRequest {
    /// Start a request with the required demographic fields
    #[must_use]
    pub const fn new(gender: Gender, orec: Orec, medicaid: bool, population: Population) -> Self {
        Self {
            gender,
            orec,
            medicaid,
            diagnosis_codes: Vec::new(),
            age: None,
            dob: None,
            population,
            verbose: false,
        }
    }

    /// Set the beneficiary age
    #[must_use]
    pub const fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Set the date of birth
    #[must_use]
    pub const fn with_dob(mut self, dob: NaiveDate) -> Self {
        self.dob = Some(dob);
        self
    }

    /// Set the diagnosis code list
    #[must_use]
    pub fn with_diagnosis_codes<S: Into<String>>(mut self, codes: Vec<S>) -> Self {
        self.diagnosis_codes = codes.into_iter().map(Into::into).collect();
        self
    }

    /// Request verbose category details
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// A scoring engine bound to one model version and year
#[derive(Debug, Clone)]
pub struct RiskModel {
    rules: Arc<RuleSet>,
    requested_year: Option<u16>,
}

impl RiskModel {
    /// Build an engine over an already-loaded rule set
    #[must_use]
    pub const fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            requested_year: None,
        }
    }

    /// Build an engine by asking a provider for the given version and year.
    ///
    /// The result echoes both the requested year and the year of the rule
    /// set actually supplied, which differ when the provider fell back.
    pub fn from_provider(
        provider: &dyn RuleSetProvider,
        version: &str,
        year: Option<u16>,
    ) -> Result<Self> {
        let rules = provider.rule_set(version, year)?;
        Ok(Self {
            rules,
            requested_year: year,
        })
    }

    /// The rule set this engine scores against
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Score one beneficiary.
    ///
    /// Stages: demographic banding, diagnosis mapping, hierarchy resolution,
    /// count/interaction synthesis, aggregation, result assembly. A fatal
    /// error aborts the whole call; no partial result is ever returned.
    pub fn score(&self, request: &ScoreRequest) -> Result<ScoringResult> {
        let rules = &*self.rules;
        let beneficiary = MedicareBeneficiary::new(
            request.gender,
            request.orec,
            request.medicaid,
            request.population,
            request.age,
            request.dob,
            rules.model_year,
        )?;

        let demographics = determine_demographic_categories(rules, &beneficiary)?;

        // New enrollees are scored on demographics alone; their coefficient
        // tables carry no disease columns.
        let run_disease_stages =
            !beneficiary.population.is_new_enrollee() && !request.diagnosis_codes.is_empty();

        let (mapped, hierarchy_outcome) = if run_disease_stages {
            let mapped = map_diagnoses(rules, &beneficiary, &request.diagnosis_codes);
            let outcome = resolve_hierarchies(rules, &mapped.category_ids());
            (Some(mapped), Some(outcome))
        } else {
            (None, None)
        };

        let survivors: &[String] = hierarchy_outcome
            .as_ref()
            .map_or(&[], |outcome| outcome.survivors.as_slice());
        let count = if run_disease_stages {
            count_category(rules, survivors)
        } else {
            None
        };
        let interactions: Vec<String> = if run_disease_stages {
            interaction_categories(rules, survivors, beneficiary.disabled)
                .into_iter()
                .sorted_unstable()
                .collect()
        } else {
            Vec::new()
        };

        // Deterministic, permutation-independent ordering: demographic band,
        // demographic interactions, sorted disease survivors, count,
        // sorted interactions.
        let mut category_list: Vec<String> =
            Vec::with_capacity(2 + survivors.len() + interactions.len() + 2);
        category_list.push(demographics.band_category.clone());
        category_list.extend(demographics.interaction_categories.iter().cloned());
        category_list.extend(survivors.iter().cloned().sorted_unstable());
        category_list.extend(count.clone());
        category_list.extend(interactions);

        let categories = category_list
            .iter()
            .map(|id| {
                let info = rules.category_info(id)?;
                let coefficient = rules.coefficient(id, &beneficiary.risk_model_population)?;
                let source_diagnoses = mapped
                    .as_ref()
                    .and_then(|m| m.codes_for(id))
                    .map(<[String]>::to_vec)
                    .unwrap_or_default();
                let dropped_categories = hierarchy_outcome
                    .as_ref()
                    .and_then(|outcome| outcome.dropped_by(id))
                    .map(<[String]>::to_vec);
                Ok(ScoredCategory {
                    id: id.clone(),
                    kind: info.kind,
                    coefficient,
                    source_diagnoses,
                    dropped_categories,
                    number: info.number,
                    description: info.description.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let totals = aggregate(rules, &categories);

        let category_details: BTreeMap<String, CategoryDetail> = categories
            .iter()
            .map(|category| {
                (
                    category.id.clone(),
                    CategoryDetail::from_category(category, request.verbose),
                )
            })
            .collect();

        Ok(ScoringResult {
            gender: beneficiary.gender.to_string(),
            orec: beneficiary.orec.to_string(),
            medicaid: beneficiary.medicaid,
            age: request.age,
            dob: request.dob,
            diagnosis_codes: request.diagnosis_codes.clone(),
            malformed_codes: mapped.map(|m| m.malformed_codes).unwrap_or_default(),
            year: self.requested_year,
            population: beneficiary.population.to_string(),
            risk_model_age: beneficiary.risk_model_age,
            risk_model_population: beneficiary.risk_model_population.clone(),
            model_version: rules.version.clone(),
            model_year: rules.model_year,
            coding_intensity_adjuster: rules.coding_intensity_adjuster,
            normalization_factor: rules.normalization_factor,
            score_raw: totals.score_raw,
            disease_score_raw: totals.disease_score_raw,
            demographic_score_raw: totals.demographic_score_raw,
            score: totals.score,
            disease_score: totals.disease_score,
            demographic_score: totals.demographic_score,
            category_list,
            category_details,
        })
    }

    /// Score a batch of beneficiaries in parallel.
    ///
    /// Results come back in input order; each entry fails or succeeds
    /// independently.
    #[must_use]
    pub fn score_batch(&self, requests: &[ScoreRequest]) -> Vec<Result<ScoringResult>> {
        requests.par_iter().map(|r| self.score(r)).collect()
    }
}
