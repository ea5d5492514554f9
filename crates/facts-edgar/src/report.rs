//! Trend report: derived series plus headline metrics.

use facts_core::{DerivedEntry, FinancialData, FinancialTrendReport, LatestMetrics, Symbol};

use crate::metrics::{derive_series, determine_trend};

/// Quarters fetched before deriving, so the oldest reported quarter still has
/// a prior-year comparison.
pub const REPORT_FETCH_QUARTERS: usize = 16;

/// Years fetched before deriving.
pub const REPORT_FETCH_YEARS: usize = 10;

/// Quarters kept in the report.
pub const REPORT_QUARTERS: usize = 12;

/// Years kept in the report.
pub const REPORT_YEARS: usize = 8;

/// Periods of the primary series the headline metrics look at.
const LATEST_WINDOW: usize = 8;

/// Builds a trend report, or `None` if neither series has data.
///
/// Margins and growth are derived over the full fetched series before it is
/// trimmed. Headline metrics come from the quarterly series when it has data,
/// the annual series otherwise.
#[must_use]
pub fn build_trend_report(symbol: &Symbol, data: &FinancialData) -> Option<FinancialTrendReport> {
    if !data.has_quarterly && !data.has_annual {
        return None;
    }

    let quarterly = derive_series(&data.quarterly);
    let annual = derive_series(&data.annual);

    let primary = if data.has_quarterly { &quarterly } else { &annual };
    let latest_metrics = latest_metrics(tail(primary, LATEST_WINDOW));

    Some(FinancialTrendReport {
        symbol: symbol.clone(),
        currency: "USD".to_string(),
        quarterly: tail(&quarterly, REPORT_QUARTERS).to_vec(),
        annual: tail(&annual, REPORT_YEARS).to_vec(),
        has_quarterly: data.has_quarterly,
        has_annual: data.has_annual,
        latest_metrics,
    })
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

fn latest_metrics(recent: &[DerivedEntry]) -> LatestMetrics {
    let operating_margins: Vec<Option<f64>> = recent.iter().map(|d| d.operating_margin).collect();
    let net_margins: Vec<Option<f64>> = recent.iter().map(|d| d.net_margin).collect();

    LatestMetrics {
        revenue_growth: recent.last().and_then(|d| d.revenue_growth_yoy),
        margin_trend: determine_trend(&operating_margins),
        profitability_trend: determine_trend(&net_margins),
    }
}
