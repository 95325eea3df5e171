#[cfg(test)]
mod tests {
    use crate::utils::{init_logging, v24_fixture};
    use hcc_risk_engine::{
        Gender, Orec, Population, RiskModel, RuleSet, ScoreRequest, ScoringError,
        StaticRuleSetProvider,
    };
    use std::sync::Arc;

    fn request() -> ScoreRequest {
        ScoreRequest::new(Gender::Male, Orec::OldAge, false, Population::Cna)
            .with_age(70)
            .with_diagnosis_codes(vec!["E1169", "I5030", "I509", "I2111", "I209"])
    }

    #[test]
    fn test_rule_set_json_round_trip() {
        let rules = v24_fixture();
        let json = serde_json::to_string(&*rules).unwrap();
        let reloaded = RuleSet::from_json(&json).unwrap();

        assert_eq!(reloaded.version, rules.version);
        assert_eq!(reloaded.model_year, rules.model_year);

        // A reloaded rule set scores identically to the original
        let original = RiskModel::new(Arc::clone(&rules)).score(&request()).unwrap();
        let reloaded = RiskModel::new(Arc::new(reloaded)).score(&request()).unwrap();
        assert_eq!(
            serde_json::to_string(&original).unwrap(),
            serde_json::to_string(&reloaded).unwrap()
        );
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            RuleSet::from_json("{\"version\": \"v24\""),
            Err(ScoringError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_provider_year_fallback_is_reported() {
        init_logging();
        let mut provider = StaticRuleSetProvider::new();
        provider.register(v24_fixture());

        // 2026 tables do not exist; the provider falls back to 2024 and the
        // result reports both years.
        let model = RiskModel::from_provider(&provider, "v24", Some(2026)).unwrap();
        let result = model.score(&request()).unwrap();
        assert_eq!(result.year, Some(2026));
        assert_eq!(result.model_year, 2024);

        let model = RiskModel::from_provider(&provider, "v24", Some(2024)).unwrap();
        let result = model.score(&request()).unwrap();
        assert_eq!(result.year, Some(2024));
        assert_eq!(result.model_year, 2024);
    }

    #[test]
    fn test_unknown_version_is_fatal() {
        let provider = StaticRuleSetProvider::new();
        assert!(matches!(
            RiskModel::from_provider(&provider, "v99", None),
            Err(ScoringError::UnsupportedYear { .. })
        ));
    }

    #[test]
    fn test_mapped_category_without_coefficient_is_fatal() {
        // A rule set whose diagnosis map emits a category its coefficient
        // table does not know is internally inconsistent.
        let rules = hcc_risk_engine::RuleSetBuilder::new("v24", 2024)
            .category("M70_74", hcc_risk_engine::CategoryType::Demographic, None, None)
            .coefficient("M70_74", "CNA", 0.379)
            .diagnosis("E1169", vec!["HCC18"])
            .category("HCC18", hcc_risk_engine::CategoryType::Disease, Some(18), None)
            .build()
            .unwrap();
        let model = RiskModel::new(Arc::new(rules));
        let req = ScoreRequest::new(Gender::Male, Orec::OldAge, false, Population::Cna)
            .with_age(70)
            .with_diagnosis_codes(vec!["E1169"]);
        assert!(matches!(
            model.score(&req),
            Err(ScoringError::UnknownCategory { .. })
        ));
    }
}
