//! SEC EDGAR HTTP client with rate limiting.

use async_trait::async_trait;
use facts_core::{
    Cik, CompanyFacts, CompanyTicker, FactsError, FactsFetch, FilingsSource, Result, TickerIndex,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use crate::config::EdgarConfig;

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            last_request: now.checked_sub(min_interval).unwrap_or(now),
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// SEC EDGAR HTTP client.
///
/// Fetches the ticker index and company-facts documents, sending the configured
/// user agent with every request and spacing requests per SEC requirements
/// (max 10 requests/second by default).
#[derive(Debug)]
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    config: EdgarConfig,
}

impl EdgarClient {
    /// Create a new EDGAR client with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    ///
    /// # Errors
    /// Returns [`FactsError::Network`] if the HTTP client cannot be built.
    ///
    /// # Example
    /// ```
    /// use facts_edgar::EdgarClient;
    ///
    /// let client = EdgarClient::new("MyApp/1.0 (contact@example.com)").unwrap();
    /// ```
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::from_config(EdgarConfig::new(user_agent))
    }

    /// Create a new EDGAR client from a full configuration.
    ///
    /// # Errors
    /// Returns [`FactsError::Network`] if the HTTP client cannot be built.
    pub fn from_config(config: EdgarConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(|e| FactsError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config))
    }

    /// Create a new EDGAR client with a custom HTTP client.
    ///
    /// The client should already carry the identifying user agent.
    ///
    /// # Example
    /// ```
    /// use facts_edgar::{EdgarClient, EdgarConfig};
    /// use std::time::Duration;
    ///
    /// let client = reqwest::Client::builder()
    ///     .timeout(Duration::from_secs(60))
    ///     .user_agent("MyApp/1.0 (contact@example.com)")
    ///     .build()
    ///     .unwrap();
    ///
    /// let edgar = EdgarClient::with_client(client, EdgarConfig::new("MyApp/1.0 (contact@example.com)"));
    /// ```
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: EdgarConfig) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.rate_limit()))),
            config,
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &EdgarConfig {
        &self.config
    }

    async fn get(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        self.rate_limiter.lock().await.wait().await;
        self.client.get(url).send().await
    }
}

#[async_trait]
impl FilingsSource for EdgarClient {
    fn name(&self) -> &str {
        "SEC EDGAR"
    }

    async fn fetch_ticker_index(&self) -> Result<TickerIndex> {
        let url = self.config.tickers_url.as_str();

        debug!("Fetching company tickers from {}", url);
        let response = self
            .get(url)
            .await
            .map_err(|e| FactsError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FactsError::Http {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        // Parse as a map of index -> CompanyTicker
        let data: HashMap<String, CompanyTicker> = response
            .json()
            .await
            .map_err(|e| FactsError::Parse(format!("Failed to parse company tickers: {e}")))?;

        let index: TickerIndex = data.into_values().collect();
        debug!(tickers = index.len(), "Loaded ticker index");
        Ok(index)
    }

    async fn fetch_company_facts(&self, cik: &Cik) -> FactsFetch {
        let url = self.config.company_facts_url(cik.as_str());

        debug!("Fetching company facts from {}", url);
        let response = match self.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(cik = %cik, error = %e, "Failed to fetch SEC company facts");
                return FactsFetch::Unavailable {
                    reason: e.to_string(),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(cik = %cik, status = status.as_u16(), "SEC EDGAR returned an error status");
            return FactsFetch::NoData {
                status: status.as_u16(),
            };
        }

        match response.json::<CompanyFacts>().await {
            Ok(facts) => FactsFetch::Found(Box::new(facts)),
            Err(e) => {
                warn!(cik = %cik, error = %e, "Failed to parse SEC company facts");
                FactsFetch::Unavailable {
                    reason: format!("Failed to parse company facts: {e}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_name_and_config() {
        let client = EdgarClient::new("Test/1.0 (test@example.com)").unwrap();
        assert_eq!(client.name(), "SEC EDGAR");
        assert_eq!(client.config().user_agent, "Test/1.0 (test@example.com)");
        assert_eq!(client.config().rate_limit(), Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_rate_limiter_spaces_requests() {
        let mut limiter = RateLimiter::new(Duration::from_millis(20));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let config = EdgarConfig::new("Test/1.0 (test@example.com)")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout_secs(2)
            .with_rate_limit_ms(0);
        let client = EdgarClient::from_config(config).unwrap();

        let outcome = client.fetch_company_facts(&Cik::from_number(320193)).await;
        assert!(matches!(outcome, FactsFetch::Unavailable { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_index_is_an_error() {
        let config = EdgarConfig::new("Test/1.0 (test@example.com)")
            .with_tickers_url("http://127.0.0.1:9/company_tickers.json")
            .with_timeout_secs(2)
            .with_rate_limit_ms(0);
        let client = EdgarClient::from_config(config).unwrap();

        let result = client.fetch_ticker_index().await;
        assert!(matches!(result, Err(FactsError::Network(_))));
    }
}
