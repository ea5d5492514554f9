#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for SEC financial facts normalization.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`FilingsSource`](provider::FilingsSource) - Ticker index and company-facts retrieval
//! - [`FactsCache`](cache::FactsCache) - Caching abstraction for company-facts documents
//! - [`CompanyFacts`](document::CompanyFacts) - The nested company-facts document
//! - [`FinancialEntry`](types::FinancialEntry) and friends - Normalized series types

/// Cache trait for storing fetched documents.
pub mod cache;
/// Company-facts document model.
pub mod document;
/// Error types for facts operations.
pub mod error;
/// DataFrame export of financial series.
pub mod frame;
/// Reporting period definitions.
pub mod frequency;
/// Ticker to CIK index.
pub mod index;
/// Provider trait for fetching filings data.
pub mod provider;
/// Core data types (Symbol, Cik, PeriodKey, FinancialEntry, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use cache::{DEFAULT_FACTS_TTL, FactsCache};
pub use document::{CompanyFacts, ConceptFacts, FactRecord};
pub use error::{FactsError, Result};
pub use frame::{derived_frame, entries_frame};
pub use frequency::{FiscalPeriod, PeriodType};
pub use index::{CompanyTicker, TickerIndex, TickerRecord};
pub use provider::{FactsFetch, FilingsSource};
pub use types::{
    Cik, DerivedEntry, FinancialData, FinancialEntry, FinancialTrendReport, LatestMetrics,
    PeriodKey, Symbol, Trend,
};
