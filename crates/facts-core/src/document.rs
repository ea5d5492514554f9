//! SEC EDGAR company-facts document model.
//!
//! The company-facts API nests reported values by taxonomy, then concept name,
//! then unit:
//!
//! ```text
//! facts -> "us-gaap" -> "Revenues" -> units -> "USD" -> [FactRecord, ...]
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::frequency::FiscalPeriod;

/// The US GAAP taxonomy key.
pub const US_GAAP: &str = "us-gaap";

/// The US dollar unit key.
pub const USD: &str = "USD";

/// Response from the SEC EDGAR company-facts API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFacts {
    /// CIK number (SEC returns this as an integer)
    #[serde(default)]
    pub cik: Option<u64>,
    /// Entity name
    #[serde(default)]
    pub entity_name: String,
    /// Facts organized by taxonomy and concept
    #[serde(default)]
    pub facts: HashMap<String, HashMap<String, ConceptFacts>>,
}

impl CompanyFacts {
    /// Looks up a concept within a taxonomy.
    #[must_use]
    pub fn concept(&self, taxonomy: &str, name: &str) -> Option<&ConceptFacts> {
        self.facts.get(taxonomy)?.get(name)
    }

    /// Looks up a US GAAP concept.
    #[must_use]
    pub fn us_gaap(&self, name: &str) -> Option<&ConceptFacts> {
        self.concept(US_GAAP, name)
    }
}

/// Reported values for one concept label.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptFacts {
    /// Label
    #[serde(default)]
    pub label: Option<String>,
    /// Description
    #[serde(default)]
    pub description: Option<String>,
    /// Values keyed by unit (USD, shares, etc.)
    #[serde(default)]
    pub units: HashMap<String, Vec<FactRecord>>,
}

impl ConceptFacts {
    /// Values reported in `unit`, or an empty slice.
    #[must_use]
    pub fn unit(&self, unit: &str) -> &[FactRecord] {
        self.units.get(unit).map_or(&[], Vec::as_slice)
    }
}

/// A single reported value with its filing metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    /// Value
    pub val: f64,
    /// Accession number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accn: Option<String>,
    /// Fiscal year of the filing
    #[serde(default)]
    pub fy: Option<i32>,
    /// Fiscal period (Q1, Q2, Q3, Q4, FY)
    #[serde(default)]
    pub fp: Option<String>,
    /// Form type (10-Q, 10-K, 20-F, ...)
    #[serde(default)]
    pub form: Option<String>,
    /// Filed date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filed: Option<String>,
    /// Calendar frame, e.g. CY2023Q1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
    /// Start date of the covered period (absent for instant facts)
    #[serde(default)]
    pub start: Option<String>,
    /// End date of the covered period
    #[serde(default)]
    pub end: Option<String>,
}

impl FactRecord {
    /// Parsed fiscal period tag.
    #[must_use]
    pub fn fiscal_period(&self) -> Option<FiscalPeriod> {
        self.fp.as_deref()?.parse().ok()
    }

    /// Parsed start date.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_date(self.start.as_deref()?)
    }

    /// Parsed end date.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_date(self.end.as_deref()?)
    }

    /// Days between start and end, or `None` for instant facts and bad dates.
    #[must_use]
    pub fn span_days(&self) -> Option<i64> {
        let start = self.start_date()?;
        let end = self.end_date()?;
        Some(end.signed_duration_since(start).num_days())
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "cik": 320193,
        "entityName": "Apple Inc.",
        "facts": {
            "us-gaap": {
                "Revenues": {
                    "label": "Revenues",
                    "description": null,
                    "units": {
                        "USD": [
                            {"start": "2023-07-02", "end": "2023-09-30", "val": 89498000000,
                             "accn": "0000320193-23-000106", "fy": 2023, "fp": "FY",
                             "form": "10-K", "filed": "2023-11-03", "frame": "CY2023Q3"},
                            {"end": "2023-09-30", "val": 1.0, "fy": 2023, "fp": "FY", "form": "10-K"}
                        ]
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_company_facts() {
        let facts: CompanyFacts = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(facts.cik, Some(320193));
        assert_eq!(facts.entity_name, "Apple Inc.");

        let revenues = facts.us_gaap("Revenues").unwrap();
        let usd = revenues.unit(USD);
        assert_eq!(usd.len(), 2);
        assert_eq!(usd[0].val, 89_498_000_000.0);
        assert_eq!(usd[0].fiscal_period(), Some(FiscalPeriod::FY));
        assert_eq!(usd[0].span_days(), Some(90));
        assert_eq!(usd[1].span_days(), None);
        assert!(revenues.unit("shares").is_empty());
        assert!(facts.us_gaap("GrossProfit").is_none());
    }

    #[test]
    fn test_bad_dates_have_no_span() {
        let fact = FactRecord {
            start: Some("2023-13-01".to_string()),
            end: Some("2023-12-31".to_string()),
            ..Default::default()
        };
        assert_eq!(fact.span_days(), None);
    }
}
