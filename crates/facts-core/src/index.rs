//! Ticker to CIK index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Cik, Symbol};

/// One row of the SEC `company_tickers.json` document.
///
/// The SEC returns `{"0": {"cik_str": 320193, "ticker": "AAPL", "title": "Apple Inc."}, ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTicker {
    /// CIK as a number (SEC returns this as an integer despite the name)
    pub cik_str: u64,
    /// Ticker symbol
    pub ticker: String,
    /// Company name
    pub title: String,
}

/// A resolved ticker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickerRecord {
    /// Padded CIK.
    pub cik: Cik,
    /// Company name from the index.
    pub title: String,
}

/// Immutable mapping from upper-cased ticker to CIK.
#[derive(Clone, Debug, Default)]
pub struct TickerIndex {
    by_ticker: HashMap<String, TickerRecord>,
}

impl TickerIndex {
    /// Builds the index from raw rows. A ticker listed twice keeps its last row.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = CompanyTicker>) -> Self {
        let by_ticker = entries
            .into_iter()
            .map(|entry| {
                (
                    entry.ticker.to_uppercase(),
                    TickerRecord {
                        cik: Cik::from_number(entry.cik_str),
                        title: entry.title,
                    },
                )
            })
            .collect();
        Self { by_ticker }
    }

    /// Looks up a symbol.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<&TickerRecord> {
        self.by_ticker.get(symbol.as_str())
    }

    /// Looks up a symbol's CIK.
    #[must_use]
    pub fn cik(&self, symbol: &Symbol) -> Option<&Cik> {
        self.get(symbol).map(|record| &record.cik)
    }

    /// Number of tickers in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_ticker.len()
    }

    /// Returns true if the index has no tickers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_ticker.is_empty()
    }
}

impl FromIterator<CompanyTicker> for TickerIndex {
    fn from_iter<I: IntoIterator<Item = CompanyTicker>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
