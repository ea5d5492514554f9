//! Core data types for normalized financial series.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`Cik`] - SEC Central Index Key
//! - [`PeriodKey`] - `{year}-{period}` join key across metrics
//! - [`FinancialEntry`] - One period of raw income statement metrics
//! - [`DerivedEntry`] - A financial entry with margins and growth
//! - [`FinancialData`] - Quarterly and annual series for one company
//! - [`FinancialTrendReport`] - Derived series plus latest trend metrics

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FactsError, Result};
use crate::frequency::FiscalPeriod;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// SEC Central Index Key, always stored zero-padded to 10 digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cik(String);

impl Cik {
    /// Width of a padded CIK.
    pub const WIDTH: usize = 10;

    /// Creates a CIK from its numeric form.
    #[must_use]
    pub fn from_number(cik: u64) -> Self {
        Self(format!("{cik:0>width$}", width = Self::WIDTH))
    }

    /// Parses a CIK from a string of up to 10 digits, padding it with zeros.
    ///
    /// # Errors
    /// Returns [`FactsError::InvalidParameter`] if the string is empty, too long,
    /// or contains anything other than ASCII digits.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.len() > Self::WIDTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FactsError::InvalidParameter(format!("Invalid CIK: {s:?}")));
        }
        Ok(Self(format!("{s:0>width$}", width = Self::WIDTH)))
    }

    /// Returns the padded CIK.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join key for one reporting period, e.g. `2024-Q2` or `2024-FY`.
///
/// Keys order chronologically: by fiscal year, then Q1 < Q2 < Q3 < Q4 < FY.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Fiscal period within the year.
    pub period: FiscalPeriod,
}

impl PeriodKey {
    /// Creates a new period key.
    #[must_use]
    pub const fn new(fiscal_year: i32, period: FiscalPeriod) -> Self {
        Self {
            fiscal_year,
            period,
        }
    }

    /// The same period one fiscal year earlier.
    #[must_use]
    pub const fn prior_year(&self) -> Self {
        Self::new(self.fiscal_year - 1, self.period)
    }

    /// Human label such as `Q2 2024` or `FY 2024`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.period, self.fiscal_year)
    }

    /// Last calendar day of the period.
    ///
    /// Quarter `n` ends on the last day of calendar month `3n`; the full year
    /// ends on December 31. Returns `None` for years chrono cannot represent.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        let month = self.period.quarter().map_or(12, |q| q * 3);
        last_day_of_month(self.fiscal_year, month)
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.fiscal_year, self.period)
    }
}

impl FromStr for PeriodKey {
    type Err = FactsError;

    fn from_str(s: &str) -> Result<Self> {
        let (year, period) = s
            .split_once('-')
            .ok_or_else(|| FactsError::Parse(format!("Invalid period key: {s}")))?;
        let fiscal_year = year
            .parse()
            .map_err(|_| FactsError::Parse(format!("Invalid period key year: {s}")))?;
        Ok(Self::new(fiscal_year, period.parse()?))
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = first_of_next.pred_opt()?;
    debug_assert_eq!(last.month(), month);
    Some(last)
}

/// One reporting period of income statement metrics.
///
/// Each metric is independently nullable: a period may report revenue
/// without gross profit, for instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEntry {
    /// End date of the period.
    pub date: NaiveDate,
    /// Human label, e.g. `Q2 2024`.
    pub quarter_label: String,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Fiscal period tag.
    pub fiscal_period: FiscalPeriod,
    /// Total revenue.
    pub revenue: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Operating income.
    pub operating_income: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
}

impl FinancialEntry {
    /// Creates an entry for `key` with no metrics set.
    ///
    /// # Errors
    /// Returns [`FactsError::InvalidDate`] if the period end date cannot be represented.
    pub fn new(key: PeriodKey) -> Result<Self> {
        let date = key
            .end_date()
            .ok_or_else(|| FactsError::InvalidDate(format!("No end date for period {key}")))?;
        Ok(Self {
            date,
            quarter_label: key.label(),
            fiscal_year: key.fiscal_year,
            fiscal_period: key.period,
            revenue: None,
            net_income: None,
            operating_income: None,
            gross_profit: None,
        })
    }

    /// The period key this entry was built from.
    #[must_use]
    pub const fn key(&self) -> PeriodKey {
        PeriodKey::new(self.fiscal_year, self.fiscal_period)
    }

    /// Returns true if revenue or net income is present.
    #[must_use]
    pub const fn has_headline_metric(&self) -> bool {
        self.revenue.is_some() || self.net_income.is_some()
    }
}

/// A financial entry with margins and year-over-year growth.
///
/// All derived values are percentages rounded to one decimal place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedEntry {
    /// The underlying entry.
    #[serde(flatten)]
    pub entry: FinancialEntry,
    /// Gross profit / revenue.
    pub gross_margin: Option<f64>,
    /// Operating income / revenue.
    pub operating_margin: Option<f64>,
    /// Net income / revenue.
    pub net_margin: Option<f64>,
    /// Revenue growth against the same period one fiscal year earlier.
    #[serde(rename = "revenueGrowthYoY")]
    pub revenue_growth_yoy: Option<f64>,
    /// Net income growth against the same period one fiscal year earlier.
    #[serde(rename = "netIncomeGrowthYoY")]
    pub net_income_growth_yoy: Option<f64>,
}

/// Quarterly and annual series for one company.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    /// Quarterly entries in ascending chronological order.
    pub quarterly: Vec<FinancialEntry>,
    /// Annual entries in ascending chronological order.
    pub annual: Vec<FinancialEntry>,
    /// Whether any quarterly entry has revenue or net income.
    pub has_quarterly: bool,
    /// Whether any annual entry has revenue or net income.
    pub has_annual: bool,
}

/// Direction of a metric over its three most recent observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Rose by more than 5%.
    Improving,
    /// Moved by at most 5% either way.
    Stable,
    /// Fell by more than 5%.
    Declining,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Improving => f.write_str("improving"),
            Self::Stable => f.write_str("stable"),
            Self::Declining => f.write_str("declining"),
        }
    }
}

/// Headline metrics taken from the most recent periods of the primary series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestMetrics {
    /// Year-over-year revenue growth of the latest period.
    pub revenue_growth: Option<f64>,
    /// Trend of the operating margin.
    pub margin_trend: Option<Trend>,
    /// Trend of the net margin.
    pub profitability_trend: Option<Trend>,
}

/// Derived quarterly and annual series with headline trend metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTrendReport {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Reporting currency.
    pub currency: String,
    /// Derived quarterly entries.
    pub quarterly: Vec<DerivedEntry>,
    /// Derived annual entries.
    pub annual: Vec<DerivedEntry>,
    /// Whether the quarterly series has data.
    pub has_quarterly: bool,
    /// Whether the annual series has data.
    pub has_annual: bool,
    /// Headline metrics.
    pub latest_metrics: LatestMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_creation() {
        assert_eq!(Symbol::new("aapl").as_str(), "AAPL");
        assert_eq!(Symbol::new(" msft ").as_str(), "MSFT");
        assert!(Symbol::new("").is_empty());
    }

    #[test]
    fn test_cik_padding() {
        assert_eq!(Cik::from_number(320193).as_str(), "0000320193");
        assert_eq!(Cik::parse("320193").unwrap().as_str(), "0000320193");
        assert_eq!(Cik::parse("0000320193").unwrap().as_str(), "0000320193");
        assert!(Cik::parse("").is_err());
        assert!(Cik::parse("12345678901").is_err());
        assert!(Cik::parse("32O193").is_err());
    }

    #[test]
    fn test_period_key_display_and_parse() {
        let key = PeriodKey::new(2024, FiscalPeriod::Q2);
        assert_eq!(key.to_string(), "2024-Q2");
        assert_eq!("2024-Q2".parse::<PeriodKey>().unwrap(), key);
        assert_eq!(
            "2023-FY".parse::<PeriodKey>().unwrap(),
            PeriodKey::new(2023, FiscalPeriod::FY)
        );
        assert!("2024".parse::<PeriodKey>().is_err());
        assert!("abcd-Q1".parse::<PeriodKey>().is_err());
    }

    #[test]
    fn test_period_key_ordering() {
        let mut keys = vec![
            PeriodKey::new(2024, FiscalPeriod::Q1),
            PeriodKey::new(2023, FiscalPeriod::FY),
            PeriodKey::new(2023, FiscalPeriod::Q4),
            PeriodKey::new(2022, FiscalPeriod::Q3),
        ];
        keys.sort();
        let labels: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(labels, ["2022-Q3", "2023-Q4", "2023-FY", "2024-Q1"]);
    }

    #[test]
    fn test_period_key_end_date() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(
            PeriodKey::new(2024, FiscalPeriod::Q1).end_date(),
            Some(d(2024, 3, 31))
        );
        assert_eq!(
            PeriodKey::new(2024, FiscalPeriod::Q2).end_date(),
            Some(d(2024, 6, 30))
        );
        assert_eq!(
            PeriodKey::new(2023, FiscalPeriod::Q3).end_date(),
            Some(d(2023, 9, 30))
        );
        assert_eq!(
            PeriodKey::new(2023, FiscalPeriod::Q4).end_date(),
            Some(d(2023, 12, 31))
        );
        assert_eq!(
            PeriodKey::new(2022, FiscalPeriod::FY).end_date(),
            Some(d(2022, 12, 31))
        );
        assert_eq!(PeriodKey::new(300_000, FiscalPeriod::Q1).end_date(), None);
        assert_eq!(PeriodKey::new(i32::MAX, FiscalPeriod::FY).end_date(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PeriodKey::new(2024, FiscalPeriod::Q2).label(), "Q2 2024");
        assert_eq!(PeriodKey::new(2021, FiscalPeriod::FY).label(), "FY 2021");
        assert_eq!(
            PeriodKey::new(2024, FiscalPeriod::Q2).prior_year(),
            PeriodKey::new(2023, FiscalPeriod::Q2)
        );
    }

    #[test]
    fn test_derived_entry_serializes_flat_camel_case() {
        let entry = FinancialEntry::new(PeriodKey::new(2024, FiscalPeriod::Q2)).unwrap();
        let derived = DerivedEntry {
            entry,
            gross_margin: Some(45.2),
            operating_margin: None,
            net_margin: None,
            revenue_growth_yoy: Some(4.9),
            net_income_growth_yoy: None,
        };
        let json = serde_json::to_value(&derived).unwrap();
        assert_eq!(json["quarterLabel"], "Q2 2024");
        assert_eq!(json["date"], "2024-06-30");
        assert_eq!(json["fiscalPeriod"], "Q2");
        assert_eq!(json["grossMargin"], 45.2);
        assert_eq!(json["revenueGrowthYoY"], 4.9);
        assert!(json["netMargin"].is_null());
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Trend::Improving).unwrap(),
            "\"improving\""
        );
        assert_eq!(Trend::Declining.to_string(), "declining");
    }
}
