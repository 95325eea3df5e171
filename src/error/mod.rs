//! Error handling for the risk-adjustment scoring engine.
//!
//! Unmapped diagnosis codes and zero-weight categories are not errors;
//! they are valid, auditable outcomes. Everything here either signals bad
//! caller input or a corrupt/mismatched rule set.

/// Errors that can occur while scoring a beneficiary
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// Malformed or missing demographic input (recoverable by the caller)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Age outside the bands representable by the model
    #[error("Invalid age: {0}")]
    InvalidAge(String),

    /// No reference data exists for the requested model version
    #[error("Unsupported year: no rule set registered for model version '{version}'")]
    UnsupportedYear {
        /// Model version the caller asked for
        version: String,
    },

    /// The pipeline produced a category the rule set does not define.
    /// Signals a corrupt or mismatched rule set, never defaulted to zero.
    #[error("Unknown category '{category}' in {version} rule set")]
    UnknownCategory {
        /// Category id missing from the rule set
        category: String,
        /// Model version of the rule set in use
        version: String,
    },

    /// The coefficient table has no column for the risk-model population
    #[error("Unknown population '{population}' in coefficient row for '{category}'")]
    UnknownPopulation {
        /// Population segment missing from the coefficient row
        population: String,
        /// Category whose row was being read
        category: String,
    },
}

/// Result type for scoring operations
pub type Result<T> = std::result::Result<T, ScoringError>;
