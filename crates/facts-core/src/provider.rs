//! Provider trait for fetching filings data.
//!
//! [`FilingsSource`] is the seam between the normalizer and the network. The
//! EDGAR client implements it over HTTP; tests implement it in memory.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{document::CompanyFacts, error::Result, index::TickerIndex, types::Cik};

/// Outcome of a company-facts request.
///
/// Keeps "the filer has no data" apart from "the service could not be reached"
/// so callers can decide whether to cache, retry, or report.
#[derive(Clone, Debug, PartialEq)]
pub enum FactsFetch {
    /// The document was retrieved.
    Found(Box<CompanyFacts>),
    /// The service answered with a non-success status (typically 404 for
    /// filers without XBRL filings).
    NoData {
        /// HTTP status code.
        status: u16,
    },
    /// The request failed before a usable response arrived.
    Unavailable {
        /// What went wrong.
        reason: String,
    },
}

impl FactsFetch {
    /// Returns the document, discarding the reason for its absence.
    #[must_use]
    pub fn into_found(self) -> Option<CompanyFacts> {
        match self {
            Self::Found(facts) => Some(*facts),
            Self::NoData { .. } | Self::Unavailable { .. } => None,
        }
    }

    /// Returns true if a document was retrieved.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Source of the ticker index and company-facts documents.
#[async_trait]
pub trait FilingsSource: Send + Sync + Debug {
    /// Returns the name of this source (e.g., "SEC EDGAR").
    fn name(&self) -> &str;

    /// Fetches the full ticker to CIK index.
    ///
    /// Failures are errors: an empty index would be indistinguishable from
    /// "ticker not found".
    async fn fetch_ticker_index(&self) -> Result<TickerIndex>;

    /// Fetches the company-facts document for a CIK.
    async fn fetch_company_facts(&self, cik: &Cik) -> FactsFetch;
}
