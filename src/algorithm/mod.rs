//! Category resolution pipeline stages
//!
//! The stages run leaves-first: the demographic categorizer and diagnosis
//! mapper are independent, the hierarchy resolver consumes the mapper's
//! output, the count/interaction engine consumes the resolver's survivors,
//! and the aggregator consumes the final category set. Every stage is a pure
//! function over the rule set and its inputs.

pub mod aggregate;
pub mod demographic;
pub mod hierarchy;
pub mod interaction;
pub mod mapper;

pub use aggregate::{ScoreTotals, SCORE_DECIMALS, aggregate, round_score};
pub use demographic::{DemographicCategories, MAX_AGE, determine_demographic_categories};
pub use hierarchy::{HierarchyOutcome, resolve_hierarchies};
pub use interaction::{count_category, interaction_categories};
pub use mapper::{MappedCategory, MappedDiagnoses, map_diagnoses, normalize_code};
