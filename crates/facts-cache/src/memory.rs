//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::Utc;
use facts_core::{Cik, CompanyFacts, FactsCache, Result};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    cached_at: chrono::DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > chrono::TimeDelta::from_std(ttl).unwrap_or(chrono::TimeDelta::MAX)
    }
}

/// Simple in-memory cache for testing and development.
///
/// Documents are stored in a `RwLock`-protected `HashMap` keyed by CIK and are
/// lost when the cache is dropped. Documents are cloned on get/put operations.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    facts: RwLock<HashMap<Cik, CacheEntry<CompanyFacts>>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents, fresh or stale.
    pub async fn len(&self) -> usize {
        self.facts.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.facts.read().await.is_empty()
    }
}

#[async_trait]
impl FactsCache for InMemoryCache {
    #[instrument(skip(self), fields(cik = %cik))]
    async fn get_facts(&self, cik: &Cik, ttl: Duration) -> Result<Option<CompanyFacts>> {
        let cache = self.facts.read().await;
        match cache.get(cik) {
            Some(entry) if !entry.is_stale(ttl) => {
                debug!("Cache hit for company facts");
                Ok(Some(entry.data.clone()))
            }
            Some(_) => {
                debug!("Cached company facts are stale");
                Ok(None)
            }
            None => {
                debug!("Cache miss for company facts");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, facts), fields(cik = %cik))]
    async fn put_facts(&self, cik: &Cik, facts: &CompanyFacts) -> Result<()> {
        let mut cache = self.facts.write().await;
        cache.insert(cik.clone(), CacheEntry::new(facts.clone()));
        debug!("Cached company facts");
        Ok(())
    }

    #[instrument(skip(self), fields(cik = %cik))]
    async fn invalidate(&self, cik: &Cik) -> Result<bool> {
        let removed = self.facts.write().await.remove(cik).is_some();
        debug!(removed, "Invalidated company facts");
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.facts.write().await;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();

        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }

        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.facts.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
