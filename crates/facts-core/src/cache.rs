//! Cache trait for storing fetched company-facts documents.
//!
//! This module defines the [`FactsCache`] trait that provides a unified interface
//! for caching company-facts documents keyed by CIK.

use async_trait::async_trait;
use std::time::Duration;

use crate::{document::CompanyFacts, error::Result, types::Cik};

/// Default lifetime of a cached company-facts document (one day).
pub const DEFAULT_FACTS_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Trait for caching fetched company-facts documents.
///
/// Implementations can store data in various backends (SQLite, in-memory, etc.)
/// to avoid repeated API calls. Filing facts do not change intraday, so a TTL
/// on the order of a day is appropriate.
#[async_trait]
pub trait FactsCache: Send + Sync {
    /// Retrieves a cached document no older than `ttl`.
    ///
    /// Returns `Ok(Some(facts))` if a fresh entry exists, `Ok(None)` otherwise.
    async fn get_facts(&self, cik: &Cik, ttl: Duration) -> Result<Option<CompanyFacts>>;

    /// Stores a document, replacing any previous entry for the CIK.
    async fn put_facts(&self, cik: &Cik, facts: &CompanyFacts) -> Result<()>;

    /// Removes the entry for one CIK.
    ///
    /// Returns true if an entry was removed.
    async fn invalidate(&self, cik: &Cik) -> Result<bool>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}
