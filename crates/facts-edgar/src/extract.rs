//! Concept extraction: one metric's values keyed by reporting period.

use facts_core::document::USD;
use facts_core::{CompanyFacts, FactRecord, FiscalPeriod, PeriodKey, PeriodType};
use std::collections::BTreeMap;
use tracing::trace;

use crate::concepts::Metric;

/// One metric's values keyed by period, in chronological order.
pub type PeriodValues = BTreeMap<PeriodKey, f64>;

/// Domestic and foreign interim report forms.
const QUARTERLY_FORMS: &[&str] = &["10-Q", "6-K"];

/// Domestic and foreign annual report forms.
const ANNUAL_FORMS: &[&str] = &["10-K", "20-F", "40-F"];

/// Extracts a series for one metric.
///
/// See [`extract_series`].
#[must_use]
pub fn extract_metric(facts: &CompanyFacts, metric: Metric, period_type: PeriodType) -> PeriodValues {
    extract_series(facts, metric.concepts(), period_type)
}

/// Extracts period values from the first US GAAP concept label, among
/// `concepts`, that covers the most recent fiscal year.
///
/// Each label yields a candidate map of accepted USD facts, first-seen wins
/// per period key. Candidates are never merged: two labels may define the
/// metric slightly differently. A later label replaces the current pick only
/// if its latest fiscal year is strictly newer, so filers that migrated to a
/// new label are read from the label they use today.
///
/// Returns an empty map if no label yields an accepted period.
#[must_use]
pub fn extract_series(
    facts: &CompanyFacts,
    concepts: &[&str],
    period_type: PeriodType,
) -> PeriodValues {
    let mut best = PeriodValues::new();
    let mut best_year: Option<i32> = None;

    for &concept in concepts {
        let Some(concept_facts) = facts.us_gaap(concept) else {
            continue;
        };

        let candidate = candidate_values(concept_facts.unit(USD), period_type);
        let Some((latest, _)) = candidate.last_key_value() else {
            continue;
        };
        let latest_year = latest.fiscal_year;

        trace!(
            concept,
            periods = candidate.len(),
            latest_year,
            %period_type,
            "Candidate concept"
        );

        if best_year.is_none_or(|year| latest_year > year) {
            best_year = Some(latest_year);
            best = candidate;
        }
    }

    best
}

fn candidate_values(values: &[FactRecord], period_type: PeriodType) -> PeriodValues {
    let mut map = PeriodValues::new();
    for fact in values {
        if let Some(key) = period_key(fact, period_type) {
            map.entry(key).or_insert(fact.val);
        }
    }
    map
}

/// The period a fact reports for, or `None` if the fact is not a standalone
/// period of the requested type from an accepted form, or its fiscal year has
/// no calendar date.
///
/// Quarterly series read Q1-Q3 from interim forms and Q4 from annual forms
/// whose fact spans a single quarter. Annual series read FY facts from annual
/// forms spanning a full year.
fn period_key(fact: &FactRecord, period_type: PeriodType) -> Option<PeriodKey> {
    let fiscal_year = fact.fy?;
    let fiscal_period = fact.fiscal_period()?;
    let form = fact.form.as_deref()?;

    if !period_type.accepts_span(fact.span_days()?) {
        return None;
    }

    let annual_form = ANNUAL_FORMS.contains(&form);
    let period = match (period_type, fiscal_period) {
        (PeriodType::Quarterly, FiscalPeriod::FY) if annual_form => FiscalPeriod::Q4,
        (PeriodType::Quarterly, quarter) if QUARTERLY_FORMS.contains(&form) && quarter.is_quarter() => {
            quarter
        }
        (PeriodType::Annual, FiscalPeriod::FY) if annual_form => FiscalPeriod::FY,
        _ => return None,
    };

    let key = PeriodKey::new(fiscal_year, period);
    // keys must map to a calendar date to become entries
    key.end_date()?;
    Some(key)
}
