//! A Rust library implementing CMS Hierarchical Condition Category (HCC)
//! risk-adjustment scoring: demographic banding, diagnosis-to-category
//! mapping, hierarchy suppression, disease-count and disease-interaction
//! synthesis, and weighted aggregation with coding-intensity and
//! normalization adjustments.
//!
//! The pipeline is a single generic implementation parameterized by a
//! [`RuleSet`]; each model version and payment year is a data instance, not
//! a code path. Rule sets are loaded once, frozen, and shared read-only, so
//! scoring is safe to run from many threads against one instance.

pub mod algorithm;
pub mod engine;
pub mod error;
pub mod models;
pub mod ruleset;

// Re-export the most common types for easier use
// Core types
pub use engine::{RiskModel, ScoreRequest};
pub use error::{Result, ScoringError};
pub use models::{
    CategoryDetail, CategoryType, Gender, MedicareBeneficiary, Orec, Population, ScoredCategory,
    ScoringResult,
};

// Rule-set construction and provisioning
pub use ruleset::bands::AgeBands;
pub use ruleset::provider::{RuleSetProvider, StaticRuleSetProvider};
pub use ruleset::{
    AgeSexEdit, CategoryInfo, CountBucket, DemographicInteraction, InteractionRule, RuleSet,
    RuleSetBuilder,
};
