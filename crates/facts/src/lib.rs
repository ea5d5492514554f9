#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/facts/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR financial facts normalization.
//!
//! This crate re-exports the core types, the EDGAR normalizer and the cache
//! implementations, and provides a [`NormalizerBuilder`] for assembling a
//! [`FinancialsNormalizer`] with a configured cache.
//!
//! # Features
//!
//! - `cache-sqlite` - SQLite-based caching

// Core types and traits
pub use facts_core::*;

// Cache implementations
#[cfg(feature = "cache-sqlite")]
pub use facts_cache::SqliteCache;
pub use facts_cache::{InMemoryCache, NoopCache};

// Normalizer
pub use facts_edgar::{
    CikResolver, DEFAULT_QUARTERS, DEFAULT_USER_AGENT, DEFAULT_YEARS, EdgarClient, EdgarConfig,
    FinancialsNormalizer, Metric, TickerIndexCache, build_financial_data, build_trend_report,
    derive_series, determine_trend, extract_metric, extract_series, margin, yoy_growth,
};

mod builder;
pub use builder::NormalizerBuilder;
