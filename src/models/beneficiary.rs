//! Beneficiary entity model
//!
//! This module contains the `MedicareBeneficiary` model along with the typed
//! demographic fields it is built from. A beneficiary is constructed once per
//! scoring call and never mutated; the derived fields (risk-model age,
//! disability flags, risk-model population) are computed at construction.

use crate::error::{Result, ScoringError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender of a beneficiary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male ("M")
    #[serde(rename = "M")]
    Male,
    /// Female ("F")
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Single-letter code used in demographic category ids
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "M" | "m" => Ok(Self::Male),
            "F" | "f" => Ok(Self::Female),
            other => Err(ScoringError::InvalidInput(format!(
                "gender must be M or F, got '{other}'"
            ))),
        }
    }
}

/// Original entitlement reason code (OREC)
///
/// See <https://bluebutton.cms.gov/assets/ig/ValueSet-orec.html> for the
/// value set this mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orec {
    /// "0" - entitled by old age
    #[serde(rename = "0")]
    OldAge,
    /// "1" - entitled by disability
    #[serde(rename = "1")]
    Disability,
    /// "2" - entitled by end-stage renal disease
    #[serde(rename = "2")]
    Esrd,
    /// "3" - entitled by disability and ESRD
    #[serde(rename = "3")]
    DisabilityAndEsrd,
}

impl Orec {
    /// Code digit as it appears in CMS enrollment data
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OldAge => "0",
            Self::Disability => "1",
            Self::Esrd => "2",
            Self::DisabilityAndEsrd => "3",
        }
    }
}

impl fmt::Display for Orec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orec {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0" => Ok(Self::OldAge),
            "1" => Ok(Self::Disability),
            "2" => Ok(Self::Esrd),
            "3" => Ok(Self::DisabilityAndEsrd),
            other => Err(ScoringError::InvalidInput(format!(
                "orec must be one of 0-3, got '{other}'"
            ))),
        }
    }
}

/// Population segment a beneficiary is scored under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Population {
    /// Community, non-dual, aged
    #[serde(rename = "CNA")]
    Cna,
    /// Community, non-dual, disabled
    #[serde(rename = "CND")]
    Cnd,
    /// Community, partial-dual, aged
    #[serde(rename = "CPA")]
    Cpa,
    /// Community, partial-dual, disabled
    #[serde(rename = "CPD")]
    Cpd,
    /// Community, full-dual, aged
    #[serde(rename = "CFA")]
    Cfa,
    /// Community, full-dual, disabled
    #[serde(rename = "CFD")]
    Cfd,
    /// Institutional
    #[serde(rename = "INS")]
    Ins,
    /// New enrollee (insufficient diagnosis history, demographics only)
    #[serde(rename = "NE")]
    Ne,
}

impl Population {
    /// Segment code as used in coefficient tables
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cna => "CNA",
            Self::Cnd => "CND",
            Self::Cpa => "CPA",
            Self::Cpd => "CPD",
            Self::Cfa => "CFA",
            Self::Cfd => "CFD",
            Self::Ins => "INS",
            Self::Ne => "NE",
        }
    }

    /// Whether this is a new-enrollee segment (scored on demographics alone)
    #[must_use]
    pub const fn is_new_enrollee(self) -> bool {
        matches!(self, Self::Ne)
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Population {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "CNA" => Ok(Self::Cna),
            "CND" => Ok(Self::Cnd),
            "CPA" => Ok(Self::Cpa),
            "CPD" => Ok(Self::Cpd),
            "CFA" => Ok(Self::Cfa),
            "CFD" => Ok(Self::Cfd),
            "INS" => Ok(Self::Ins),
            "NE" => Ok(Self::Ne),
            other => Err(ScoringError::InvalidInput(format!(
                "population '{other}' is not recognized by this model"
            ))),
        }
    }
}

/// A Medicare beneficiary prepared for scoring
///
/// Immutable per scoring call. All derived demographic facts the pipeline
/// needs are resolved here, so the downstream stages only read fields.
#[derive(Debug, Clone)]
pub struct MedicareBeneficiary {
    /// Gender as supplied by the caller
    pub gender: Gender,
    /// Original entitlement reason code
    pub orec: Orec,
    /// Dual-eligible (Medicaid) flag
    pub medicaid: bool,
    /// Population segment supplied by the caller
    pub population: Population,
    /// Age supplied by the caller, if any
    pub age: Option<u32>,
    /// Date of birth supplied by the caller, if any
    pub dob: Option<NaiveDate>,
    /// Age actually used by the model (derived from DOB when age is absent)
    pub risk_model_age: u32,
    /// Currently disabled: under 65 and not entitled by old age
    pub disabled: bool,
    /// Originally disabled: entitled by disability but no longer disabled
    pub originally_disabled: bool,
    /// Population segment used for coefficient lookup; differs from
    /// `population` for new enrollees, which resolve to a sub-population
    pub risk_model_population: String,
}

impl MedicareBeneficiary {
    /// Build a beneficiary for the given model year.
    ///
    /// The model year anchors the DOB-to-age conversion: CMS uses age as of
    /// February 1 of the payment year. An explicit `age` is trusted as-is.
    pub fn new(
        gender: Gender,
        orec: Orec,
        medicaid: bool,
        population: Population,
        age: Option<u32>,
        dob: Option<NaiveDate>,
        model_year: u16,
    ) -> Result<Self> {
        let risk_model_age = determine_age(age, dob, model_year)?;
        let (disabled, originally_disabled) = determine_disabled(risk_model_age, orec);
        let risk_model_population = if population.is_new_enrollee() {
            new_enrollee_population(risk_model_age, orec, medicaid).to_string()
        } else {
            population.as_str().to_string()
        };

        Ok(Self {
            gender,
            orec,
            medicaid,
            population,
            age,
            dob,
            risk_model_age,
            disabled,
            originally_disabled,
            risk_model_population,
        })
    }
}

/// Resolve the age used by the model from either an explicit age or a DOB.
///
/// DOB is PHI, so callers may pass a precomputed age instead; in that case
/// it is assumed to already be the age as of February 1 of the payment year.
fn determine_age(age: Option<u32>, dob: Option<NaiveDate>, model_year: u16) -> Result<u32> {
    if let Some(dob) = dob {
        let reference = NaiveDate::from_ymd_opt(i32::from(model_year), 2, 1).ok_or_else(|| {
            ScoringError::InvalidInput(format!("model year {model_year} out of range"))
        })?;
        let mut years = reference.year() - dob.year();
        if (reference.month(), reference.day()) < (dob.month(), dob.day()) {
            years -= 1;
        }
        u32::try_from(years).map_err(|_| {
            ScoringError::InvalidAge(format!(
                "date of birth {dob} is after the {model_year} reference date"
            ))
        })
    } else if let Some(age) = age {
        Ok(age)
    } else {
        Err(ScoringError::InvalidInput(
            "either an age or a date of birth is required".to_string(),
        ))
    }
}

/// Disability flags per the CMS definition: disabled when under 65 with a
/// non-old-age entitlement; originally disabled when the entitlement reason
/// was disability but the beneficiary has since aged in.
const fn determine_disabled(age: u32, orec: Orec) -> (bool, bool) {
    let disabled = age < 65 && !matches!(orec, Orec::OldAge);
    let originally_disabled =
        matches!(orec, Orec::Disability | Orec::DisabilityAndEsrd) && !disabled;
    (disabled, originally_disabled)
}

/// Resolve the new-enrollee sub-population used for coefficient lookup.
///
/// CMS publishes distinct coefficient sets per combination of Medicaid
/// status and originally-disabled status for new enrollees.
fn new_enrollee_population(age: u32, orec: Orec, medicaid: bool) -> &'static str {
    let originally_disabled = age >= 65 && matches!(orec, Orec::Disability);
    match (medicaid, originally_disabled) {
        (false, false) => "NE_NMCAID_NORIGDIS",
        (true, false) => "NE_MCAID_NORIGDIS",
        (false, true) => "NE_NMCAID_ORIGDIS",
        (true, true) => "NE_MCAID_ORIGDIS",
    }
}
