//! Ticker in, normalized income statement series out.

use facts_core::{
    Cik, CompanyFacts, FactsCache, FactsFetch, FilingsSource, FinancialData, FinancialEntry,
    FinancialTrendReport, PeriodType, Result, Symbol,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::client::EdgarClient;
use crate::concepts::Metric;
use crate::config::EdgarConfig;
use crate::extract::extract_metric;
use crate::report::{REPORT_FETCH_QUARTERS, REPORT_FETCH_YEARS, build_trend_report};
use crate::resolver::{CikResolver, TickerIndexCache};
use crate::series::{MetricValues, build_financial_data, has_data};

/// Turns company-facts documents into quarterly and annual series.
///
/// Unknown tickers and unavailable documents are `Ok(None)`; only a failure
/// to load the ticker index is an error. Fetched documents are stored in the
/// optional [`FactsCache`].
///
/// # Example
///
/// ```no_run
/// use facts_edgar::FinancialsNormalizer;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let normalizer = FinancialsNormalizer::edgar("MyApp/1.0 (contact@example.com)")?;
///
///     if let Some(entries) = normalizer.quarterly_financials("AAPL", 8).await? {
///         for entry in entries {
///             println!("{}: {:?}", entry.quarter_label, entry.revenue);
///         }
///     }
///     Ok(())
/// }
/// ```
pub struct FinancialsNormalizer<S: ?Sized = EdgarClient> {
    source: Arc<S>,
    resolver: CikResolver<S>,
    cache: Option<Arc<dyn FactsCache>>,
    facts_ttl: Duration,
}

impl<S: ?Sized> Clone for FinancialsNormalizer<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            resolver: self.resolver.clone(),
            cache: self.cache.clone(),
            facts_ttl: self.facts_ttl,
        }
    }
}

impl<S: FilingsSource + ?Sized> fmt::Debug for FinancialsNormalizer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinancialsNormalizer")
            .field("source", &self.source.name())
            .field("cached", &self.cache.is_some())
            .field("facts_ttl", &self.facts_ttl)
            .finish()
    }
}

impl FinancialsNormalizer<EdgarClient> {
    /// Creates a normalizer over SEC EDGAR with default settings.
    ///
    /// # Errors
    /// Returns [`FactsError::Network`](facts_core::FactsError::Network) if the
    /// HTTP client cannot be built.
    pub fn edgar(user_agent: &str) -> Result<Self> {
        Self::from_config(EdgarConfig::new(user_agent))
    }

    /// Creates a normalizer over SEC EDGAR from a full configuration.
    ///
    /// # Errors
    /// Returns [`FactsError::Network`](facts_core::FactsError::Network) if the
    /// HTTP client cannot be built.
    pub fn from_config(config: EdgarConfig) -> Result<Self> {
        let ttl = config.facts_ttl();
        Ok(Self::new(Arc::new(EdgarClient::from_config(config)?)).with_facts_ttl(ttl))
    }
}

impl<S> FinancialsNormalizer<S>
where
    S: FilingsSource + ?Sized,
{
    /// Creates a normalizer over `source` with its own ticker index cache and
    /// no facts cache.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self::with_index_cache(source, Arc::new(TickerIndexCache::new()))
    }

    /// Creates a normalizer sharing an existing ticker index cache.
    #[must_use]
    pub fn with_index_cache(source: Arc<S>, index: Arc<TickerIndexCache>) -> Self {
        Self {
            resolver: CikResolver::new(Arc::clone(&source), index),
            source,
            cache: None,
            facts_ttl: facts_core::DEFAULT_FACTS_TTL,
        }
    }

    /// Stores fetched documents in `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn FactsCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets how long cached documents stay fresh.
    #[must_use]
    pub const fn with_facts_ttl(mut self, ttl: Duration) -> Self {
        self.facts_ttl = ttl;
        self
    }

    /// The ticker resolver.
    #[must_use]
    pub const fn resolver(&self) -> &CikResolver<S> {
        &self.resolver
    }

    /// How long cached documents stay fresh.
    #[must_use]
    pub const fn facts_ttl(&self) -> Duration {
        self.facts_ttl
    }

    /// The facts cache, if any.
    #[must_use]
    pub fn cache(&self) -> Option<&Arc<dyn FactsCache>> {
        self.cache.as_ref()
    }

    /// Resolves a ticker to its CIK.
    ///
    /// # Errors
    /// See [`CikResolver::resolve`].
    pub async fn resolve(&self, ticker: &str) -> Result<Option<Cik>> {
        self.resolver.resolve(ticker).await
    }

    /// Fetches the company-facts document for a CIK, cache first.
    ///
    /// Only [`FactsFetch::Found`] documents are cached. Cache failures are
    /// logged and otherwise ignored.
    #[instrument(skip(self, cik), fields(cik = %cik))]
    pub async fn fetch_facts(&self, cik: &Cik) -> FactsFetch {
        if let Some(cache) = &self.cache {
            match cache.get_facts(cik, self.facts_ttl).await {
                Ok(Some(facts)) => {
                    debug!("Company facts cache hit");
                    return FactsFetch::Found(Box::new(facts));
                }
                Ok(None) => debug!("Company facts cache miss"),
                Err(e) => warn!(error = %e, "Failed to read company facts cache"),
            }
        }

        let outcome = self.source.fetch_company_facts(cik).await;

        if let (Some(cache), FactsFetch::Found(facts)) = (&self.cache, &outcome) {
            if let Err(e) = cache.put_facts(cik, facts).await {
                warn!(error = %e, "Failed to write company facts cache");
            }
        }

        outcome
    }

    /// Resolves `ticker` and fetches its document, collapsing every way of
    /// not getting one into `None`.
    async fn facts_for(&self, ticker: &str) -> Result<Option<CompanyFacts>> {
        let Some(cik) = self.resolve(ticker).await? else {
            return Ok(None);
        };

        match self.fetch_facts(&cik).await {
            FactsFetch::Found(facts) => Ok(Some(*facts)),
            FactsFetch::NoData { status } => {
                debug!(ticker, cik = %cik, status, "No company facts for filer");
                Ok(None)
            }
            FactsFetch::Unavailable { reason } => {
                warn!(ticker, cik = %cik, reason = %reason, "Company facts unavailable");
                Ok(None)
            }
        }
    }

    /// Quarterly and annual series for a ticker.
    ///
    /// Returns `Ok(None)` if the ticker is unknown or its document cannot be
    /// retrieved. A retrieved document with no usable facts yields empty
    /// series with both `has_*` flags false.
    ///
    /// # Errors
    /// Returns an error for an empty ticker or if the ticker index cannot be loaded.
    #[instrument(skip(self))]
    pub async fn financial_data(
        &self,
        ticker: &str,
        quarterly_limit: usize,
        annual_limit: usize,
    ) -> Result<Option<FinancialData>> {
        let Some(facts) = self.facts_for(ticker).await? else {
            return Ok(None);
        };

        let quarterly = build_financial_data(
            &metric_values(&facts, PeriodType::Quarterly),
            quarterly_limit,
        )?;
        let annual = build_financial_data(&metric_values(&facts, PeriodType::Annual), annual_limit)?;

        debug!(
            quarters = quarterly.len(),
            years = annual.len(),
            "Assembled financial series"
        );

        Ok(Some(FinancialData {
            has_quarterly: has_data(&quarterly),
            has_annual: has_data(&annual),
            quarterly,
            annual,
        }))
    }

    /// The most recent `count` quarters for a ticker, oldest first.
    ///
    /// Returns `Ok(None)` if the ticker is unknown or its document cannot be
    /// retrieved.
    ///
    /// # Errors
    /// Returns an error for an empty ticker or if the ticker index cannot be loaded.
    #[instrument(skip(self))]
    pub async fn quarterly_financials(
        &self,
        ticker: &str,
        count: usize,
    ) -> Result<Option<Vec<FinancialEntry>>> {
        let Some(facts) = self.facts_for(ticker).await? else {
            return Ok(None);
        };

        build_financial_data(&metric_values(&facts, PeriodType::Quarterly), count).map(Some)
    }

    /// The filer's registered name.
    ///
    /// # Errors
    /// Returns an error for an empty ticker or if the ticker index cannot be loaded.
    #[instrument(skip(self))]
    pub async fn company_name(&self, ticker: &str) -> Result<Option<String>> {
        Ok(self
            .facts_for(ticker)
            .await?
            .map(|facts| facts.entity_name)
            .filter(|name| !name.is_empty()))
    }

    /// Derived series with margins, growth, and trend classification.
    ///
    /// Returns `Ok(None)` if the ticker is unknown, its document cannot be
    /// retrieved, or neither series has data.
    ///
    /// # Errors
    /// Returns an error for an empty ticker or if the ticker index cannot be loaded.
    #[instrument(skip(self))]
    pub async fn financial_trend(&self, ticker: &str) -> Result<Option<FinancialTrendReport>> {
        let Some(data) = self
            .financial_data(ticker, REPORT_FETCH_QUARTERS, REPORT_FETCH_YEARS)
            .await?
        else {
            return Ok(None);
        };

        Ok(build_trend_report(&Symbol::new(ticker), &data))
    }
}

fn metric_values(facts: &CompanyFacts, period_type: PeriodType) -> MetricValues {
    MetricValues {
        revenue: extract_metric(facts, Metric::Revenue, period_type),
        net_income: extract_metric(facts, Metric::NetIncome, period_type),
        operating_income: extract_metric(facts, Metric::OperatingIncome, period_type),
        gross_profit: extract_metric(facts, Metric::GrossProfit, period_type),
    }
}
