//! Derived metrics: margins, year-over-year growth, and trend classification.

use facts_core::{DerivedEntry, FinancialEntry, PeriodKey, Trend};
use std::collections::HashMap;

/// Relative change, in percent, beyond which a trend is not stable.
const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Number of most recent observations a trend is judged on.
const TREND_WINDOW: usize = 3;

/// Rounds to one decimal place, halves away from zero.
///
/// Negative halves round down: `-0.05` gives `-0.1`, not `-0.0`.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `numerator / denominator` as a percentage with one decimal.
///
/// `None` if either input is missing or the denominator is zero.
#[must_use]
pub fn margin(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (numerator, denominator) = (numerator?, denominator?);
    if denominator == 0.0 {
        return None;
    }
    finite(round1(numerator / denominator * 100.0))
}

/// Growth of `current` over `previous` as a percentage with one decimal.
///
/// Divides by `|previous|` so growth from a loss to a smaller loss is positive.
/// `None` if either input is missing or `previous` is zero.
#[must_use]
pub fn yoy_growth(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);
    if previous == 0.0 {
        return None;
    }
    finite(round1((current - previous) / previous.abs() * 100.0))
}

/// Classifies the direction of a series.
///
/// Missing values are dropped first. With fewer than three values left the
/// trend is unknown. Otherwise the first and last of the three most recent
/// values are compared; the middle one is ignored.
#[must_use]
pub fn determine_trend(values: &[Option<f64>]) -> Option<Trend> {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.len() < TREND_WINDOW {
        return None;
    }

    let recent = &present[present.len() - TREND_WINDOW..];
    let (first, last) = (recent[0], recent[TREND_WINDOW - 1]);
    if first == 0.0 {
        return None;
    }

    let change = finite((last - first) / first.abs() * 100.0)?;
    Some(if change > TREND_THRESHOLD_PCT {
        Trend::Improving
    } else if change < -TREND_THRESHOLD_PCT {
        Trend::Declining
    } else {
        Trend::Stable
    })
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Adds margins and year-over-year growth to each entry.
///
/// The growth comparison is the entry with the same fiscal period exactly one
/// fiscal year earlier, wherever it sits in `entries`; a gap in reporting
/// history yields `None` rather than a comparison against the wrong period.
#[must_use]
pub fn derive_series(entries: &[FinancialEntry]) -> Vec<DerivedEntry> {
    let by_key: HashMap<PeriodKey, &FinancialEntry> =
        entries.iter().map(|entry| (entry.key(), entry)).collect();

    entries
        .iter()
        .map(|entry| {
            let prior = by_key.get(&entry.key().prior_year());
            DerivedEntry {
                gross_margin: margin(entry.gross_profit, entry.revenue),
                operating_margin: margin(entry.operating_income, entry.revenue),
                net_margin: margin(entry.net_income, entry.revenue),
                revenue_growth_yoy: yoy_growth(entry.revenue, prior.and_then(|p| p.revenue)),
                net_income_growth_yoy: yoy_growth(
                    entry.net_income,
                    prior.and_then(|p| p.net_income),
                ),
                entry: entry.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use facts_core::FiscalPeriod;

    fn entry(year: i32, period: FiscalPeriod, revenue: Option<f64>, net: Option<f64>) -> FinancialEntry {
        let mut e = FinancialEntry::new(PeriodKey::new(year, period)).unwrap();
        e.revenue = revenue;
        e.net_income = net;
        e
    }

    #[test]
    fn test_margin() {
        assert_eq!(margin(Some(25.0), Some(100.0)), Some(25.0));
        assert_eq!(margin(Some(1.0), Some(3.0)), Some(33.3));
        assert_eq!(margin(Some(2.0), Some(3.0)), Some(66.7));
        assert_eq!(margin(Some(-5.0), Some(40.0)), Some(-12.5));
        assert_eq!(margin(Some(0.0), Some(40.0)), Some(0.0));
        assert_eq!(margin(Some(5.0), Some(0.0)), None);
        assert_eq!(margin(None, Some(10.0)), None);
        assert_eq!(margin(Some(5.0), None), None);
    }

    #[test]
    fn test_round1_halves_away_from_zero() {
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(0.05), 0.1);
        assert_eq!(round1(-0.05), -0.1);
        assert_eq!(round1(-0.04), 0.0);
    }

    #[test]
    fn test_yoy_growth() {
        assert_eq!(yoy_growth(Some(110.0), Some(100.0)), Some(10.0));
        assert_eq!(yoy_growth(Some(90.0), Some(100.0)), Some(-10.0));
        // loss narrowing from -100 to -50 is growth
        assert_eq!(yoy_growth(Some(-50.0), Some(-100.0)), Some(50.0));
        assert_eq!(yoy_growth(Some(1.0), Some(3.0)), Some(-66.7));
        assert_eq!(yoy_growth(Some(10.0), Some(0.0)), None);
        assert_eq!(yoy_growth(None, Some(10.0)), None);
        assert_eq!(yoy_growth(Some(10.0), None), None);
    }

    #[test]
    fn test_trend() {
        assert_eq!(determine_trend(&[Some(10.0), Some(12.0), Some(14.0)]), Some(Trend::Improving));
        assert_eq!(determine_trend(&[Some(14.0), Some(12.0), Some(10.0)]), Some(Trend::Declining));
        assert_eq!(determine_trend(&[Some(10.0), Some(20.0), Some(10.4)]), Some(Trend::Stable));
        assert_eq!(determine_trend(&[Some(10.0), Some(12.0)]), None);
        assert_eq!(determine_trend(&[None, None, None, Some(1.0)]), None);
        assert_eq!(determine_trend(&[]), None);
    }

    #[test]
    fn test_trend_ignores_nulls() {
        assert_eq!(
            determine_trend(&[Some(10.0), None, Some(12.0), Some(14.0)]),
            determine_trend(&[Some(10.0), Some(12.0), Some(14.0)])
        );
    }

    #[test]
    fn test_trend_uses_three_most_recent() {
        // 100 -> 10 overall, but the last three rise
        let values = [Some(100.0), Some(50.0), Some(10.0), Some(11.0), Some(12.0)];
        assert_eq!(determine_trend(&values), Some(Trend::Improving));
    }

    #[test]
    fn test_trend_negative_base() {
        // -10 -> -5 is an improvement relative to |-10|
        assert_eq!(determine_trend(&[Some(-10.0), Some(-7.0), Some(-5.0)]), Some(Trend::Improving));
        assert_eq!(determine_trend(&[Some(0.0), Some(1.0), Some(2.0)]), None);
    }

    #[test]
    fn test_derive_series_matches_prior_year_by_period() {
        let entries = vec![
            entry(2022, FiscalPeriod::Q2, Some(80.0), Some(8.0)),
            // 2022-Q3 missing
            entry(2022, FiscalPeriod::Q4, Some(90.0), Some(0.0)),
            entry(2023, FiscalPeriod::Q1, Some(95.0), Some(9.0)),
            entry(2023, FiscalPeriod::Q2, Some(100.0), Some(10.0)),
            entry(2023, FiscalPeriod::Q3, Some(105.0), Some(11.0)),
            entry(2023, FiscalPeriod::Q4, Some(99.0), Some(12.0)),
        ];

        let derived = derive_series(&entries);
        assert_eq!(derived.len(), entries.len());

        let q2 = &derived[3];
        assert_eq!(q2.entry.quarter_label, "Q2 2023");
        assert_eq!(q2.revenue_growth_yoy, Some(25.0));
        assert_eq!(q2.net_income_growth_yoy, Some(25.0));
        assert_eq!(q2.net_margin, Some(10.0));

        // no 2022-Q3: no comparison, even though 2022-Q4 sits four entries back
        let q3 = &derived[4];
        assert_eq!(q3.revenue_growth_yoy, None);

        // prior net income is zero
        let q4 = &derived[5];
        assert_eq!(q4.revenue_growth_yoy, Some(10.0));
        assert_eq!(q4.net_income_growth_yoy, None);

        assert!(derived[0].revenue_growth_yoy.is_none());
        assert!(derived[0].gross_margin.is_none());
    }

    #[test]
    fn test_derived_values_are_never_nan() {
        let entries = vec![
            entry(2023, FiscalPeriod::FY, Some(0.0), Some(0.0)),
            entry(2024, FiscalPeriod::FY, Some(0.0), None),
        ];
        for d in derive_series(&entries) {
            for value in [
                d.gross_margin,
                d.operating_margin,
                d.net_margin,
                d.revenue_growth_yoy,
                d.net_income_growth_yoy,
            ] {
                assert!(value.is_none_or(f64::is_finite));
            }
        }
    }
}
