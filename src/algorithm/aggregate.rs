//! Aggregator and adjuster
//!
//! Sums coefficients over the final category set into raw disease,
//! demographic and combined totals, then applies the two model-wide scale
//! factors. All six numbers are retained; downstream reporting needs the
//! sub-totals, not just the final score.

use crate::models::category::ScoredCategory;
use crate::ruleset::RuleSet;

/// Decimal places retained by score rounding
pub const SCORE_DECIMALS: u32 = 4;

/// Round a score to [`SCORE_DECIMALS`] places
#[must_use]
pub fn round_score(value: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS as i32);
    (value * factor).round() / factor
}

/// Raw and adjusted score totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTotals {
    /// Sum of all coefficients
    pub score_raw: f64,
    /// Sum of disease-kind coefficients
    pub disease_score_raw: f64,
    /// Sum of demographic-kind coefficients
    pub demographic_score_raw: f64,
    /// Adjusted total
    pub score: f64,
    /// Adjusted disease sub-total
    pub disease_score: f64,
    /// Adjusted demographic sub-total
    pub demographic_score: f64,
}

/// Aggregate the final category set into raw and adjusted totals.
///
/// The adjusted variants are `raw * coding_intensity * normalization`,
/// rounded once at [`SCORE_DECIMALS`] places.
#[must_use]
pub fn aggregate(rules: &RuleSet, categories: &[ScoredCategory]) -> ScoreTotals {
    let disease_score_raw: f64 = categories
        .iter()
        .filter(|c| c.kind.is_disease())
        .map(|c| c.coefficient)
        .sum();
    let demographic_score_raw: f64 = categories
        .iter()
        .filter(|c| c.kind.is_demographic())
        .map(|c| c.coefficient)
        .sum();
    let score_raw = disease_score_raw + demographic_score_raw;

    let adjust = |raw: f64| {
        round_score(raw * rules.coding_intensity_adjuster * rules.normalization_factor)
    };

    ScoreTotals {
        score_raw,
        disease_score_raw,
        demographic_score_raw,
        score: adjust(score_raw),
        disease_score: adjust(disease_score_raw),
        demographic_score: adjust(demographic_score_raw),
    }
}
