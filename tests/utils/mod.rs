//! Shared test fixtures: a small v24-style rule set covering the diabetes,
//! heart and lung categories the integration tests exercise.

use hcc_risk_engine::{
    AgeSexEdit, CategoryType, DemographicInteraction, Gender, InteractionRule, RuleSet,
    RuleSetBuilder,
};
use std::sync::Arc;

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

/// Initialize test logging; safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A trimmed v24-like rule set for payment year 2024
pub fn v24_fixture() -> Arc<RuleSet> {
    let mut builder = RuleSetBuilder::new("v24", 2024)
        .coding_intensity_adjuster(0.941)
        .normalization_factor(0.8673)
        // Diagnosis map
        .diagnosis("E1169", vec!["HCC18"])
        .diagnosis("I5030", vec!["HCC85"])
        .diagnosis("I509", vec!["HCC85"])
        .diagnosis("I2111", vec!["HCC86"])
        .diagnosis("I209", vec!["HCC88"])
        .diagnosis("I442", vec!["HCC96"])
        .diagnosis("J410", vec!["HCC111"])
        .diagnosis("A3681", vec!["HCC85"])
        .diagnosis("D66", vec!["HCC75"])
        // Haemophilia codes carry a different weight for female beneficiaries
        .age_sex_edit(AgeSexEdit {
            codes: ids(&["D66", "D67"]),
            gender: Some(Gender::Female),
            min_age: None,
            max_age: None,
            categories: ids(&["HCC48"]),
        })
        // Hierarchies
        .hierarchy("HCC86", vec!["HCC87", "HCC88"])
        .hierarchy("HCC17", vec!["HCC18", "HCC19"])
        .hierarchy("HCC18", vec!["HCC19"])
        // Disease interactions
        .interaction(InteractionRule {
            id: "DIABETES_CHF".to_string(),
            all_of: vec![ids(&["HCC17", "HCC18", "HCC19"]), ids(&["HCC85"])],
            requires_disabled: false,
        })
        .interaction(InteractionRule {
            id: "CHF_gCopdCF".to_string(),
            all_of: vec![ids(&["HCC85"]), ids(&["HCC110", "HCC111", "HCC112"])],
            requires_disabled: false,
        })
        .interaction(InteractionRule {
            id: "HCC85_HCC96".to_string(),
            all_of: vec![ids(&["HCC85"]), ids(&["HCC96"])],
            requires_disabled: false,
        })
        .interaction(InteractionRule {
            id: "DISABLED_HCC85".to_string(),
            all_of: vec![ids(&["HCC85"])],
            requires_disabled: true,
        })
        // Demographic interactions
        .demographic_interaction(DemographicInteraction {
            id: "OriginallyDisabled_Male".to_string(),
            gender: Some(Gender::Male),
            requires_originally_disabled: true,
            requires_medicaid: false,
        })
        .demographic_interaction(DemographicInteraction {
            id: "OriginallyDisabled_Female".to_string(),
            gender: Some(Gender::Female),
            requires_originally_disabled: true,
            requires_medicaid: false,
        });

    // Disease-count buckets
    for n in 1..=9 {
        builder = builder.count_bucket(&format!("D{n}"), n, Some(n));
    }
    builder = builder.count_bucket("D10P", 10, None);

    // Demographic bands
    for (id, weight) in [
        ("M45_54", 0.309),
        ("M65_69", 0.319),
        ("M70_74", 0.379),
        ("F65_69", 0.323),
        ("F70_74", 0.346),
    ] {
        builder = builder
            .category(id, CategoryType::Demographic, None, None)
            .coefficient(id, "CNA", weight);
    }
    builder = builder
        .category("NEF67", CategoryType::Demographic, None, None)
        .coefficient("NEF67", "NE_NMCAID_NORIGDIS", 1.426)
        .coefficient("NEF67", "NE_MCAID_NORIGDIS", 1.312)
        .coefficient("NEF67", "NE_NMCAID_ORIGDIS", 2.410)
        .coefficient("NEF67", "NE_MCAID_ORIGDIS", 2.845);

    builder = builder
        .category(
            "OriginallyDisabled_Male",
            CategoryType::DemographicInteraction,
            None,
            None,
        )
        .coefficient("OriginallyDisabled_Male", "CNA", 0.120)
        .category(
            "OriginallyDisabled_Female",
            CategoryType::DemographicInteraction,
            None,
            None,
        )
        .coefficient("OriginallyDisabled_Female", "CNA", 0.110);

    // Disease categories
    for (id, number, description, weight) in [
        ("HCC18", 18, "Diabetes with Chronic Complications", 0.302),
        ("HCC48", 48, "Coagulation Defects", 0.192),
        ("HCC75", 75, "Myasthenia Gravis and Neuromuscular", 0.472),
        ("HCC85", 85, "Congestive Heart Failure", 0.331),
        ("HCC86", 86, "Acute Myocardial Infarction", 0.195),
        ("HCC87", 87, "Unstable Angina", 0.195),
        ("HCC88", 88, "Angina Pectoris", 0.140),
        ("HCC96", 96, "Specified Heart Arrhythmias", 0.268),
        ("HCC111", 111, "Chronic Obstructive Pulmonary Disease", 0.335),
    ] {
        builder = builder
            .category(id, CategoryType::Disease, Some(number), Some(description))
            .coefficient(id, "CNA", weight);
    }

    // Count categories emitted by the tests, zero-weight for this population
    for id in ["D1", "D2", "D3", "D4", "D10P"] {
        builder = builder
            .category(id, CategoryType::DiseaseCount, None, None)
            .coefficient(id, "CNA", 0.0);
    }

    for (id, weight) in [
        ("DIABETES_CHF", 0.121),
        ("CHF_gCopdCF", 0.155),
        ("HCC85_HCC96", 0.085),
        ("DISABLED_HCC85", 0.270),
    ] {
        builder = builder
            .category(id, CategoryType::DiseaseInteraction, None, None)
            .coefficient(id, "CNA", weight);
    }

    // CND columns for the disabled-beneficiary tests
    for (id, weight) in [
        ("M45_54", 0.581),
        ("HCC85", 0.465),
        ("D1", 0.0),
        ("DISABLED_HCC85", 0.322),
    ] {
        builder = builder.coefficient(id, "CND", weight);
    }

    Arc::new(builder.build().unwrap())
}
