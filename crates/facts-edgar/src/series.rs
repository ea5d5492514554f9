//! Series assembly: joins per-metric period values into ordered entries.

use facts_core::{FinancialEntry, PeriodKey, Result};
use std::collections::BTreeSet;

use crate::extract::PeriodValues;

/// Default number of quarters returned by quarterly lookups.
pub const DEFAULT_QUARTERS: usize = 12;

/// Default number of fiscal years returned by annual lookups.
pub const DEFAULT_YEARS: usize = 8;

/// Per-metric period values for one period type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricValues {
    /// Revenue by period.
    pub revenue: PeriodValues,
    /// Net income by period.
    pub net_income: PeriodValues,
    /// Operating income by period.
    pub operating_income: PeriodValues,
    /// Gross profit by period.
    pub gross_profit: PeriodValues,
}

impl MetricValues {
    /// Every period key reported by at least one metric, in chronological order.
    #[must_use]
    pub fn periods(&self) -> BTreeSet<PeriodKey> {
        [
            &self.revenue,
            &self.net_income,
            &self.operating_income,
            &self.gross_profit,
        ]
        .into_iter()
        .flat_map(|values| values.keys().copied())
        .collect()
    }
}

/// Builds the most recent `limit` entries in ascending chronological order.
///
/// Periods sort by fiscal year, then Q1 < Q2 < Q3 < Q4 < FY. Each metric is
/// looked up independently and left `None` where the period has no value.
///
/// # Errors
/// Returns [`FactsError::InvalidDate`](facts_core::FactsError::InvalidDate) if
/// a period's end date cannot be represented.
pub fn build_financial_data(values: &MetricValues, limit: usize) -> Result<Vec<FinancialEntry>> {
    let periods = values.periods();
    let skip = periods.len().saturating_sub(limit);

    periods
        .into_iter()
        .skip(skip)
        .map(|key| {
            let mut entry = FinancialEntry::new(key)?;
            entry.revenue = values.revenue.get(&key).copied();
            entry.net_income = values.net_income.get(&key).copied();
            entry.operating_income = values.operating_income.get(&key).copied();
            entry.gross_profit = values.gross_profit.get(&key).copied();
            Ok(entry)
        })
        .collect()
}

/// Returns true if at least one entry has revenue or net income.
#[must_use]
pub fn has_data(entries: &[FinancialEntry]) -> bool {
    entries.iter().any(FinancialEntry::has_headline_metric)
}
