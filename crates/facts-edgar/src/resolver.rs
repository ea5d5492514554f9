//! Ticker to CIK resolution with a load-once index cache.

use facts_core::{Cik, FactsError, FilingsSource, Result, Symbol, TickerIndex, TickerRecord};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Holds the ticker index for the lifetime of its owner.
///
/// The index is fetched on first use and never refreshed or mutated afterwards.
/// A failed load leaves the cache empty so the next lookup tries again.
/// Concurrent first lookups wait on a single load.
#[derive(Debug, Default)]
pub struct TickerIndexCache {
    index: OnceCell<TickerIndex>,
}

impl TickerIndexCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache that is already populated.
    #[must_use]
    pub fn from_index(index: TickerIndex) -> Self {
        Self {
            index: OnceCell::new_with(Some(index)),
        }
    }

    /// Returns true once the index has been loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.index.initialized()
    }

    /// Returns the index, loading it from `source` on first use.
    ///
    /// # Errors
    /// Propagates the source's error if the index cannot be fetched.
    pub async fn get_or_load<S>(&self, source: &S) -> Result<&TickerIndex>
    where
        S: FilingsSource + ?Sized,
    {
        self.index
            .get_or_try_init(|| async move {
                debug!(source = source.name(), "Loading ticker index");
                source.fetch_ticker_index().await
            })
            .await
    }
}

/// Resolves ticker symbols to CIKs.
#[derive(Debug)]
pub struct CikResolver<S: ?Sized> {
    source: Arc<S>,
    cache: Arc<TickerIndexCache>,
}

impl<S: ?Sized> Clone for CikResolver<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S> CikResolver<S>
where
    S: FilingsSource + ?Sized,
{
    /// Creates a resolver over `source`, storing the index in `cache`.
    #[must_use]
    pub const fn new(source: Arc<S>, cache: Arc<TickerIndexCache>) -> Self {
        Self { source, cache }
    }

    /// The index cache backing this resolver.
    #[must_use]
    pub fn cache(&self) -> &Arc<TickerIndexCache> {
        &self.cache
    }

    /// Looks up the index record for a ticker in any case.
    ///
    /// # Errors
    /// Returns [`FactsError::InvalidParameter`] for an empty ticker, or the
    /// source's error if the index cannot be loaded.
    pub async fn lookup(&self, ticker: &str) -> Result<Option<TickerRecord>> {
        let symbol = Symbol::new(ticker);
        if symbol.is_empty() {
            return Err(FactsError::InvalidParameter("Empty ticker".to_string()));
        }

        let index = self.cache.get_or_load(self.source.as_ref()).await?;
        Ok(index.get(&symbol).cloned())
    }

    /// Resolves a ticker in any case to its padded CIK.
    ///
    /// Returns `Ok(None)` for tickers absent from the index (delisted,
    /// foreign-only, or not yet indexed).
    ///
    /// # Errors
    /// Returns [`FactsError::InvalidParameter`] for an empty ticker, or the
    /// source's error if the index cannot be loaded.
    pub async fn resolve(&self, ticker: &str) -> Result<Option<Cik>> {
        let cik = self.lookup(ticker).await?.map(|record| record.cik);
        match &cik {
            Some(cik) => debug!("Found CIK {} for ticker {}", cik, ticker),
            None => debug!("CIK not found for ticker {}", ticker),
        }
        Ok(cik)
    }
}
