//! SQLite-based cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use facts_core::{Cik, CompanyFacts, FactsCache, FactsError, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// SQLite-based cache for company-facts documents.
///
/// Each document is stored as one JSON row keyed by padded CIK, so the cache
/// persists across application restarts.
#[derive(Debug)]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| FactsError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| FactsError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| FactsError::Cache(e.to_string()))
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS facts_cache (
                cik TEXT PRIMARY KEY,
                entity_name TEXT NOT NULL,
                data_json TEXT NOT NULL,
                cached_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| FactsError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_facts_cached_at ON facts_cache(cached_at)",
            [],
        )
        .map_err(|e| FactsError::Cache(e.to_string()))?;

        debug!("SQLite cache schema initialized");
        Ok(())
    }
}

/// Fixed-width UTC timestamp, so stored values compare correctly as text.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn cutoff(ttl: Duration) -> Result<String> {
    let ttl = chrono::TimeDelta::from_std(ttl)
        .map_err(|e| FactsError::Cache(format!("Invalid TTL duration: {e}")))?;
    Ok(Utc::now()
        .checked_sub_signed(ttl)
        .map_or_else(|| timestamp(DateTime::<Utc>::MIN_UTC), timestamp))
}

#[async_trait]
impl FactsCache for SqliteCache {
    #[instrument(skip(self), fields(cik = %cik))]
    async fn get_facts(&self, cik: &Cik, ttl: Duration) -> Result<Option<CompanyFacts>> {
        let cutoff = cutoff(ttl)?;
        let conn = self.lock()?;

        let result = conn
            .query_row(
                "SELECT data_json FROM facts_cache WHERE cik = ?1 AND cached_at >= ?2",
                params![cik.as_str(), cutoff],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| FactsError::Cache(e.to_string()))?;

        match result {
            Some(json) => match serde_json::from_str(&json) {
                Ok(facts) => {
                    debug!("Found cached company facts");
                    Ok(Some(facts))
                }
                Err(e) => {
                    // Unreadable rows count as misses; the next put overwrites them.
                    warn!(error = %e, "Discarding unreadable cached company facts");
                    Ok(None)
                }
            },
            None => {
                debug!("No cached company facts found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, facts), fields(cik = %cik))]
    async fn put_facts(&self, cik: &Cik, facts: &CompanyFacts) -> Result<()> {
        let cached_at = timestamp(Utc::now());
        let data_json = serde_json::to_string(facts).map_err(|e| FactsError::Parse(e.to_string()))?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO facts_cache (cik, entity_name, data_json, cached_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![cik.as_str(), facts.entity_name, data_json, cached_at],
        )
        .map_err(|e| FactsError::Cache(e.to_string()))?;

        debug!(bytes = data_json.len(), "Cached company facts");
        Ok(())
    }

    #[instrument(skip(self), fields(cik = %cik))]
    async fn invalidate(&self, cik: &Cik) -> Result<bool> {
        let conn = self.lock()?;
        let deleted = conn
            .execute("DELETE FROM facts_cache WHERE cik = ?1", params![cik.as_str()])
            .map_err(|e| FactsError::Cache(e.to_string()))?;
        Ok(deleted > 0)
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let cutoff = cutoff(ttl)?;
        let conn = self.lock()?;

        let deleted = conn
            .execute(
                "DELETE FROM facts_cache WHERE cached_at < ?1",
                params![cutoff],
            )
            .map_err(|e| FactsError::Cache(e.to_string()))?;

        if deleted > 0 {
            debug!("Invalidated {} stale cache entries", deleted);
        }

        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM facts_cache", [])
            .map_err(|e| FactsError::Cache(e.to_string()))?;
        debug!("Cleared all cache entries");
        Ok(())
    }
}
