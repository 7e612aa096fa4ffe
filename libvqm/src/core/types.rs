//! common types for vqmetrics

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// constants

/// Basic signal-to-noise rating used when combining impairments (G.107 default R0)
pub const DEFAULT_R0: f64 = 93.4;

/// Lower end of the MOS scale
pub const MOS_MIN: f64 = 1.0;

/// Upper end of the MOS scale reachable through the E-model
pub const MOS_MAX: f64 = 4.5;

/// One-way delay (ms) below which no delay impairment applies
pub const DELAY_THRESHOLD_MS: f64 = 100.0;

// types

/// static table a lookup was made against
///
/// | Table           | Key        | Value                     |
/// |-----------------|------------|---------------------------|
/// | QualityToMode   | quality    | speex submode             |
/// | ModeToQuality   | mode       | quality that selects it   |
/// | ModeToSize      | mode       | bits per 20 ms frame      |
/// | LossImpairment  | mode       | measured Ie points        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupTable {
    QualityToMode,
    ModeToQuality,
    ModeToSize,
    LossImpairment,
}

impl fmt::Display for LookupTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupTable::QualityToMode => "quality-to-mode",
            LookupTable::ModeToQuality => "mode-to-quality",
            LookupTable::ModeToSize => "mode-to-size",
            LookupTable::LossImpairment => "loss-impairment",
        };
        f.write_str(name)
    }
}

/// Errors raised by metric conversions and codec bookkeeping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    /// Input violates an argument contract (quality/mode exclusivity, zero fpp)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key has no entry in one of the static tables
    #[error("No entry for {key} in the {table} table")]
    LookupFailure { table: LookupTable, key: i64 },
}

impl MetricError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MetricError::InvalidArgument(msg.into())
    }

    pub(crate) fn lookup(table: LookupTable, key: impl Into<i64>) -> Self {
        MetricError::LookupFailure {
            table,
            key: key.into(),
        }
    }

    /// is this a failed table lookup?
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, MetricError::LookupFailure { .. })
    }

    /// is this an argument contract violation?
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, MetricError::InvalidArgument(_))
    }
}

/// result type for vqmetrics stuff
pub type VqResult<T> = Result<T, MetricError>;

/// G.107 Annex B user satisfaction category for an R value
///
/// | R range  | Category                       |
/// |----------|--------------------------------|
/// | 90-100   | Very satisfied                 |
/// | 80-90    | Satisfied                      |
/// | 70-80    | Some users dissatisfied        |
/// | 60-70    | Many users dissatisfied        |
/// | 50-60    | Nearly all users dissatisfied  |
/// | 0-50     | Not recommended                |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    NotRecommended,
    NearlyAllUsersDissatisfied,
    ManyUsersDissatisfied,
    SomeUsersDissatisfied,
    Satisfied,
    VerySatisfied,
}

impl RatingBand {
    /// band for an R-factor
    pub fn from_r(r: f64) -> Self {
        if r >= 90.0 {
            RatingBand::VerySatisfied
        } else if r >= 80.0 {
            RatingBand::Satisfied
        } else if r >= 70.0 {
            RatingBand::SomeUsersDissatisfied
        } else if r >= 60.0 {
            RatingBand::ManyUsersDissatisfied
        } else if r >= 50.0 {
            RatingBand::NearlyAllUsersDissatisfied
        } else {
            RatingBand::NotRecommended
        }
    }

    /// band for a MOS LQO, through its R-factor
    pub fn from_mos(mos: f64) -> Self {
        Self::from_r(super::emodel::moslqo_to_r(mos))
    }

    /// Get a description of the band
    pub fn description(self) -> &'static str {
        match self {
            RatingBand::VerySatisfied => "Very satisfied",
            RatingBand::Satisfied => "Satisfied",
            RatingBand::SomeUsersDissatisfied => "Some users dissatisfied",
            RatingBand::ManyUsersDissatisfied => "Many users dissatisfied",
            RatingBand::NearlyAllUsersDissatisfied => "Nearly all users dissatisfied",
            RatingBand::NotRecommended => "Not recommended",
        }
    }
}

impl fmt::Display for RatingBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
