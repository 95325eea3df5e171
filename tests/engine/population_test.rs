#[cfg(test)]
mod tests {
    use crate::utils::v24_fixture;
    use chrono::NaiveDate;
    use hcc_risk_engine::{Gender, Orec, Population, RiskModel, ScoreRequest, ScoringError};

    fn new_enrollee(orec: Orec, medicaid: bool) -> ScoreRequest {
        ScoreRequest::new(Gender::Female, orec, medicaid, Population::Ne).with_age(67)
    }

    #[test]
    fn test_new_enrollee_sub_populations() {
        let model = RiskModel::new(v24_fixture());

        let result = model.score(&new_enrollee(Orec::OldAge, false)).unwrap();
        assert_eq!(result.risk_model_population, "NE_NMCAID_NORIGDIS");
        assert_eq!(result.category_list, vec!["NEF67"]);
        assert!((result.score_raw - 1.426).abs() < 1e-9);

        let result = model.score(&new_enrollee(Orec::OldAge, true)).unwrap();
        assert_eq!(result.risk_model_population, "NE_MCAID_NORIGDIS");
        assert!((result.score_raw - 1.312).abs() < 1e-9);

        let result = model.score(&new_enrollee(Orec::Disability, false)).unwrap();
        assert_eq!(result.risk_model_population, "NE_NMCAID_ORIGDIS");
        assert!((result.score_raw - 2.410).abs() < 1e-9);

        let result = model.score(&new_enrollee(Orec::Disability, true)).unwrap();
        assert_eq!(result.risk_model_population, "NE_MCAID_ORIGDIS");
        assert!((result.score_raw - 2.845).abs() < 1e-9);
    }

    #[test]
    fn test_new_enrollee_ignores_diagnosis_codes() {
        let model = RiskModel::new(v24_fixture());
        let request = new_enrollee(Orec::OldAge, false)
            .with_diagnosis_codes(vec!["E1169", "I5030"]);
        let result = model.score(&request).unwrap();

        // New-enrollee tables carry no disease columns; the codes are echoed
        // back but never mapped.
        assert_eq!(result.category_list, vec!["NEF67"]);
        assert_eq!(result.disease_score_raw, 0.0);
        assert_eq!(result.diagnosis_codes.len(), 2);
    }

    #[test]
    fn test_age_derived_from_dob() {
        let model = RiskModel::new(v24_fixture());

        // Born 1954-01-15: 70 as of 2024-02-01
        let request = ScoreRequest::new(Gender::Male, Orec::OldAge, false, Population::Cna)
            .with_dob(NaiveDate::from_ymd_opt(1954, 1, 15).unwrap());
        let result = model.score(&request).unwrap();
        assert_eq!(result.risk_model_age, 70);
        assert_eq!(result.age, None);
        assert_eq!(result.category_list, vec!["M70_74"]);

        // Born 1954-03-01: still 69 on the February 1 reference date
        let request = ScoreRequest::new(Gender::Male, Orec::OldAge, false, Population::Cna)
            .with_dob(NaiveDate::from_ymd_opt(1954, 3, 1).unwrap());
        let result = model.score(&request).unwrap();
        assert_eq!(result.risk_model_age, 69);
        assert_eq!(result.category_list, vec!["M65_69"]);
    }

    #[test]
    fn test_age_ceiling_is_fatal() {
        let model = RiskModel::new(v24_fixture());
        let request =
            ScoreRequest::new(Gender::Male, Orec::OldAge, false, Population::Cna).with_age(126);
        assert!(matches!(
            model.score(&request),
            Err(ScoringError::InvalidAge(_))
        ));
    }

    #[test]
    fn test_band_without_definition_is_fatal() {
        let model = RiskModel::new(v24_fixture());
        // Age 40 resolves to M35_44, which this rule set never defines
        let request =
            ScoreRequest::new(Gender::Male, Orec::OldAge, false, Population::Cna).with_age(40);
        assert!(matches!(
            model.score(&request),
            Err(ScoringError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn test_population_without_coefficients_is_fatal() {
        let model = RiskModel::new(v24_fixture());
        let request =
            ScoreRequest::new(Gender::Male, Orec::OldAge, false, Population::Ins).with_age(70);
        assert!(matches!(
            model.score(&request),
            Err(ScoringError::UnknownPopulation { .. })
        ));
    }
}
