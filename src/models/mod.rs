//! Data models for the scoring pipeline
//!
//! Beneficiaries, categories and scoring results. All model values are
//! created fresh per scoring call and discarded after the result is built.

pub mod beneficiary;
pub mod category;
pub mod result;

pub use beneficiary::{Gender, MedicareBeneficiary, Orec, Population};
pub use category::{CategoryDetail, CategoryType, ScoredCategory};
pub use result::ScoringResult;
