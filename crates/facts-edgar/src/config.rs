//! Client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// SEC EDGAR API base URL
pub const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers URL (hosted at www.sec.gov, not data.sec.gov)
pub const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default user agent. The SEC rejects or throttles unidentified clients.
pub const DEFAULT_USER_AGENT: &str = "facts/0.1 (contact@example.com)";

/// Settings for [`EdgarClient`](crate::EdgarClient) and
/// [`FinancialsNormalizer`](crate::FinancialsNormalizer).
///
/// # Example
/// ```
/// use facts_edgar::EdgarConfig;
///
/// let config = EdgarConfig::new("MyApp/1.0 (contact@example.com)")
///     .with_timeout_secs(60)
///     .with_facts_ttl_minutes(720);
/// assert_eq!(config.timeout_secs, 60);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgarConfig {
    /// User agent sent with every request. Format: "AppName/Version (contact@email.com)".
    pub user_agent: String,
    /// Base URL of the company-facts API.
    pub base_url: String,
    /// URL of the ticker index document.
    pub tickers_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Minimum interval between requests in milliseconds (SEC allows 10 req/s).
    pub rate_limit_ms: u64,
    /// Lifetime of cached company-facts documents in minutes.
    pub facts_ttl_minutes: u64,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: EDGAR_BASE_URL.to_string(),
            tickers_url: COMPANY_TICKERS_URL.to_string(),
            timeout_secs: 30,
            rate_limit_ms: 100,
            facts_ttl_minutes: 1440,
        }
    }
}

impl EdgarConfig {
    /// Default configuration with the given user agent.
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Self::default()
        }
    }

    /// Sets the company-facts base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the ticker index URL.
    #[must_use]
    pub fn with_tickers_url(mut self, tickers_url: impl Into<String>) -> Self {
        self.tickers_url = tickers_url.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the minimum interval between requests.
    #[must_use]
    pub const fn with_rate_limit_ms(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    /// Sets the cached document lifetime.
    #[must_use]
    pub const fn with_facts_ttl_minutes(mut self, minutes: u64) -> Self {
        self.facts_ttl_minutes = minutes;
        self
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Minimum interval between requests.
    #[must_use]
    pub const fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Cached document lifetime.
    #[must_use]
    pub const fn facts_ttl(&self) -> Duration {
        Duration::from_secs(self.facts_ttl_minutes * 60)
    }

    /// Company-facts URL for a padded CIK.
    #[must_use]
    pub fn company_facts_url(&self, cik: &str) -> String {
        format!(
            "{}/api/xbrl/companyfacts/CIK{}.json",
            self.base_url.trim_end_matches('/'),
            cik
        )
    }
}
