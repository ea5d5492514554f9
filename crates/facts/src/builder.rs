//! Builder wiring configuration and caching into a normalizer.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use facts_core::{FactsCache, Result};
use facts_edgar::{EdgarConfig, FinancialsNormalizer};

/// Assembles a [`FinancialsNormalizer`] over SEC EDGAR.
///
/// # Example
///
/// ```
/// use facts::NormalizerBuilder;
///
/// let normalizer = NormalizerBuilder::new("MyApp/1.0 (contact@example.com)")
///     .with_memory_cache()
///     .with_facts_ttl_minutes(60)
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct NormalizerBuilder {
    config: EdgarConfig,
    cache: Option<Arc<dyn FactsCache>>,
}

impl std::fmt::Debug for NormalizerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizerBuilder")
            .field("config", &self.config)
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .finish()
    }
}

impl NormalizerBuilder {
    /// Create a builder with default settings and the given user agent.
    #[must_use]
    pub fn new(user_agent: &str) -> Self {
        Self::from_config(EdgarConfig::new(user_agent))
    }

    /// Create a builder from a full configuration.
    #[must_use]
    pub fn from_config(config: EdgarConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    /// The configuration the normalizer will be built with.
    #[must_use]
    pub const fn config(&self) -> &EdgarConfig {
        &self.config
    }

    /// Set how long cached documents stay fresh.
    #[must_use]
    pub fn with_facts_ttl_minutes(mut self, minutes: u64) -> Self {
        self.config = self.config.with_facts_ttl_minutes(minutes);
        self
    }

    /// Set the cache for the normalizer.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn FactsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Cache documents in memory for the lifetime of the normalizer.
    #[must_use]
    pub fn with_memory_cache(self) -> Self {
        self.with_cache(Arc::new(facts_cache::InMemoryCache::new()))
    }

    /// Cache documents in a SQLite file.
    ///
    /// # Errors
    /// Returns [`FactsError::Cache`](facts_core::FactsError::Cache) if the
    /// database cannot be opened.
    #[cfg(feature = "cache-sqlite")]
    pub fn with_sqlite_cache(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Opening SQLite facts cache");
        Ok(self.with_cache(Arc::new(facts_cache::SqliteCache::new(path)?)))
    }

    /// Build the normalizer.
    ///
    /// # Errors
    /// Returns [`FactsError::Network`](facts_core::FactsError::Network) if the
    /// HTTP client cannot be built.
    pub fn build(self) -> Result<FinancialsNormalizer> {
        let ttl: Duration = self.config.facts_ttl();
        let normalizer = FinancialsNormalizer::from_config(self.config)?;
        debug!(cached = self.cache.is_some(), ?ttl, "Built financials normalizer");

        Ok(match self.cache {
            Some(cache) => normalizer.with_cache(cache),
            None => normalizer,
        })
    }
}
