//! No-op cache implementation.

use async_trait::async_trait;
use facts_core::{Cik, CompanyFacts, FactsCache, Result};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get_facts` always returns `Ok(None)` and `put_facts` always returns `Ok(())`.
/// Useful for disabling caching or testing code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FactsCache for NoopCache {
    async fn get_facts(&self, _cik: &Cik, _ttl: Duration) -> Result<Option<CompanyFacts>> {
        trace!("NoopCache: get_facts called, returning None");
        Ok(None)
    }

    async fn put_facts(&self, _cik: &Cik, _facts: &CompanyFacts) -> Result<()> {
        trace!("NoopCache: put_facts called, doing nothing");
        Ok(())
    }

    async fn invalidate(&self, _cik: &Cik) -> Result<bool> {
        Ok(false)
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, returning 0");
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facts_core::DEFAULT_FACTS_TTL;

    #[tokio::test]
    async fn test_noop_cache_stores_nothing() {
        let cache = NoopCache::new();
        let cik = Cik::from_number(320193);

        cache.put_facts(&cik, &CompanyFacts::default()).await.unwrap();
        let result = cache.get_facts(&cik, DEFAULT_FACTS_TTL).await.unwrap();
        assert!(result.is_none());

        assert!(!cache.invalidate(&cik).await.unwrap());
        assert_eq!(cache.invalidate_stale(Duration::ZERO).await.unwrap(), 0);
        assert!(cache.clear().await.is_ok());
    }
}
