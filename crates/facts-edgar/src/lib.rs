#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR financial facts normalizer.
//!
//! This crate provides:
//!
//! - CIK (Central Index Key) lookup from ticker symbols
//! - Company facts from the EDGAR XBRL API
//! - Concept extraction into quarterly and annual period maps
//! - Series assembly, margins, year-over-year growth, and trend classification
//!
//! # Example
//!
//! ```no_run
//! use facts_edgar::{DEFAULT_QUARTERS, DEFAULT_YEARS, FinancialsNormalizer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let normalizer = FinancialsNormalizer::edgar("MyApp/1.0 (contact@example.com)")?;
//!
//!     match normalizer.financial_data("AAPL", DEFAULT_QUARTERS, DEFAULT_YEARS).await? {
//!         Some(data) => {
//!             for entry in &data.quarterly {
//!                 println!("{}: revenue {:?}", entry.quarter_label, entry.revenue);
//!             }
//!         }
//!         None => println!("No data available"),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod concepts;
mod config;
mod extract;
mod metrics;
mod normalizer;
mod report;
mod resolver;
mod series;

pub use client::EdgarClient;
pub use concepts::Metric;
pub use config::{COMPANY_TICKERS_URL, DEFAULT_USER_AGENT, EDGAR_BASE_URL, EdgarConfig};
pub use extract::{PeriodValues, extract_metric, extract_series};
pub use metrics::{derive_series, determine_trend, margin, yoy_growth};
pub use normalizer::FinancialsNormalizer;
pub use report::{
    REPORT_FETCH_QUARTERS, REPORT_FETCH_YEARS, REPORT_QUARTERS, REPORT_YEARS, build_trend_report,
};
pub use resolver::{CikResolver, TickerIndexCache};
pub use series::{DEFAULT_QUARTERS, DEFAULT_YEARS, MetricValues, build_financial_data, has_data};
