//! Age-band tables
//!
//! Demographic bands are supplied by the rule set as ordered label lists in
//! the CMS layout: `"lower_upper"` for an inclusive range, `"lower"` for a
//! single year, `"lower_GT"` for an open-ended final band. The categorizer
//! scans bands in order and selects the first match.

use crate::error::{Result, ScoringError};
use serde::{Deserialize, Serialize};

/// One age band parsed from its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeBand {
    /// Label as it appears in category ids, e.g. "70_74", "95_GT", "67"
    pub label: String,
    /// Inclusive lower bound
    pub lower: u32,
    /// Inclusive upper bound; `None` for the open-ended final band
    pub upper: Option<u32>,
}

impl AgeBand {
    /// Parse a band from its CMS label
    pub fn parse(label: &str) -> Result<Self> {
        let invalid =
            || ScoringError::InvalidInput(format!("invalid age band label '{label}'"));
        let mut parts = label.split('_');
        let lower: u32 = parts
            .next()
            .ok_or_else(invalid)?
            .parse()
            .map_err(|_| invalid())?;
        let upper = match parts.next() {
            None => Some(lower),
            Some("GT") => None,
            Some(bound) => Some(bound.parse().map_err(|_| invalid())?),
        };
        if parts.next().is_some() || upper.is_some_and(|u| u < lower) {
            return Err(invalid());
        }
        Ok(Self {
            label: label.to_string(),
            lower,
            upper,
        })
    }

    /// Whether the given age falls in this band
    #[must_use]
    pub fn contains(&self, age: u32) -> bool {
        age >= self.lower && self.upper.is_none_or(|u| age <= u)
    }
}

/// An ordered age-band table for one population family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct AgeBands {
    bands: Vec<AgeBand>,
}

impl AgeBands {
    /// Build a band table from ordered labels
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        if labels.is_empty() {
            return Err(ScoringError::InvalidInput(
                "age band table must not be empty".to_string(),
            ));
        }
        let bands = labels
            .iter()
            .map(|label| AgeBand::parse(label.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bands })
    }

    /// First band containing the given age, scanned in table order
    #[must_use]
    pub fn band_for(&self, age: u32) -> Option<&str> {
        self.bands
            .iter()
            .find(|band| band.contains(age))
            .map(|band| band.label.as_str())
    }

    /// Number of bands in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Whether the table is empty (never true for a built table)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl TryFrom<Vec<String>> for AgeBands {
    type Error = ScoringError;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::from_labels(&labels)
    }
}

impl From<AgeBands> for Vec<String> {
    fn from(bands: AgeBands) -> Self {
        bands.bands.into_iter().map(|band| band.label).collect()
    }
}
