//! Reporting period definitions.
//!
//! This module defines [`PeriodType`] for choosing between quarterly and annual
//! series and [`FiscalPeriod`] for the self-reported fiscal period tag of a fact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::FactsError;

/// Covered span, in days, accepted as a single fiscal quarter.
const QUARTER_SPAN_DAYS: RangeInclusive<i64> = 80..=100;

/// Covered span, in days, accepted as a full fiscal year.
const ANNUAL_SPAN_DAYS: RangeInclusive<i64> = 350..=380;

/// Period type for a financial series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Quarterly reporting period.
    #[default]
    Quarterly,
    /// Annual reporting period.
    Annual,
}

impl PeriodType {
    /// Range of covered days a fact must span to count as this period type.
    #[must_use]
    pub const fn span_days(&self) -> RangeInclusive<i64> {
        match self {
            Self::Quarterly => QUARTER_SPAN_DAYS,
            Self::Annual => ANNUAL_SPAN_DAYS,
        }
    }

    /// Returns true if a fact covering `days` days belongs to this period type.
    ///
    /// Partial years and cumulative year-to-date figures fall outside both ranges.
    #[must_use]
    pub fn accepts_span(&self, days: i64) -> bool {
        self.span_days().contains(&days)
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quarterly => f.write_str("quarterly"),
            Self::Annual => f.write_str("annual"),
        }
    }
}

/// Fiscal period tag as reported by the filer.
///
/// Ordering follows the fiscal calendar with `FY` placed after `Q4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FiscalPeriod {
    /// First fiscal quarter.
    Q1,
    /// Second fiscal quarter.
    Q2,
    /// Third fiscal quarter.
    Q3,
    /// Fourth fiscal quarter.
    Q4,
    /// Full fiscal year.
    FY,
}

impl FiscalPeriod {
    /// All quarter tags in fiscal order.
    pub const QUARTERS: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Sort ordinal: 1-4 for quarters, 5 for the full year.
    #[must_use]
    pub const fn ordinal(&self) -> u32 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
            Self::FY => 5,
        }
    }

    /// Quarter number (1-4), or `None` for the full year.
    #[must_use]
    pub const fn quarter(&self) -> Option<u32> {
        match self {
            Self::FY => None,
            other => Some(other.ordinal()),
        }
    }

    /// Returns true for Q1 through Q4.
    #[must_use]
    pub const fn is_quarter(&self) -> bool {
        !matches!(self, Self::FY)
    }

    /// The tag as written in filings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
            Self::FY => "FY",
        }
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FiscalPeriod {
    type Err = FactsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            "FY" => Ok(Self::FY),
            other => Err(FactsError::Parse(format!("Unknown fiscal period: {other}"))),
        }
    }
}
