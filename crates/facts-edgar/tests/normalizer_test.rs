//! End-to-end tests for the normalizer against an in-memory filings source.

use async_trait::async_trait;
use facts_cache::InMemoryCache;
use facts_core::{
    Cik, CompanyFacts, CompanyTicker, ConceptFacts, FactRecord, FactsError, FactsFetch,
    FilingsSource, FiscalPeriod, Result, TickerIndex, Trend,
};
use facts_edgar::{DEFAULT_QUARTERS, DEFAULT_YEARS, FinancialsNormalizer};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

const APPLE_CIK: u64 = 320193;
const DELISTED_CIK: u64 = 1111;
const OFFLINE_CIK: u64 = 2222;

#[derive(Debug, Default)]
struct FakeSource {
    tickers: Vec<CompanyTicker>,
    facts: HashMap<Cik, FactsFetch>,
    index_calls: AtomicUsize,
    facts_calls: AtomicUsize,
    fail_next_index: AtomicBool,
}

impl FakeSource {
    fn index_calls(&self) -> usize {
        self.index_calls.load(Ordering::SeqCst)
    }

    fn facts_calls(&self) -> usize {
        self.facts_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilingsSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_ticker_index(&self) -> Result<TickerIndex> {
        self.index_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_index.swap(false, Ordering::SeqCst) {
            return Err(FactsError::Http {
                status: 503,
                url: "company_tickers.json".to_string(),
            });
        }
        Ok(self.tickers.iter().cloned().collect())
    }

    async fn fetch_company_facts(&self, cik: &Cik) -> FactsFetch {
        self.facts_calls.fetch_add(1, Ordering::SeqCst);
        self.facts
            .get(cik)
            .cloned()
            .unwrap_or(FactsFetch::NoData { status: 404 })
    }
}

fn ticker(cik: u64, symbol: &str, title: &str) -> CompanyTicker {
    CompanyTicker {
        cik_str: cik,
        ticker: symbol.to_string(),
        title: title.to_string(),
    }
}

fn fact(val: f64, fy: i32, fp: &str, form: &str, start: String, end: String) -> FactRecord {
    FactRecord {
        val,
        fy: Some(fy),
        fp: Some(fp.to_string()),
        form: Some(form.to_string()),
        start: Some(start),
        end: Some(end),
        ..Default::default()
    }
}

fn quarter_bounds(year: i32, quarter: u32) -> (String, String) {
    let (start, end) = match quarter {
        1 => ("01-01", "03-31"),
        2 => ("04-01", "06-30"),
        3 => ("07-01", "09-30"),
        _ => ("10-01", "12-31"),
    };
    (format!("{year}-{start}"), format!("{year}-{end}"))
}

/// Quarterly facts for `years` as filed: Q1-Q3 on 10-Qs next to their
/// year-to-date totals, Q4 and the full year on the 10-K.
fn filed_series(years: std::ops::RangeInclusive<i32>, value: impl Fn(i32, u32) -> f64) -> Vec<FactRecord> {
    let mut facts = Vec::new();
    for year in years {
        let mut ytd = 0.0;
        for quarter in 1..=4 {
            let (start, end) = quarter_bounds(year, quarter);
            let v = value(year, quarter);
            ytd += v;
            if quarter == 4 {
                facts.push(fact(ytd, year, "FY", "10-K", format!("{year}-01-01"), end.clone()));
                facts.push(fact(v, year, "FY", "10-K", start, end));
            } else {
                let fp = format!("Q{quarter}");
                if quarter > 1 {
                    facts.push(fact(ytd, year, &fp, "10-Q", format!("{year}-01-01"), end.clone()));
                }
                facts.push(fact(v, year, &fp, "10-Q", start, end));
            }
        }
    }
    facts
}

fn concept(values: Vec<FactRecord>) -> ConceptFacts {
    ConceptFacts {
        units: HashMap::from([("USD".to_string(), values)]),
        ..Default::default()
    }
}

fn revenue(year: i32, quarter: u32) -> f64 {
    f64::from(year - 2000) * 100.0 + f64::from(quarter)
}

fn apple_facts() -> CompanyFacts {
    let us_gaap = HashMap::from([
        // an older revenue label the filer stopped using
        ("SalesRevenueNet".to_string(), concept(filed_series(2015..=2017, |_, _| 1.0))),
        (
            "RevenueFromContractWithCustomerExcludingAssessedTax".to_string(),
            concept(filed_series(2022..=2024, revenue)),
        ),
        (
            "NetIncomeLoss".to_string(),
            concept(filed_series(2022..=2024, |y, q| revenue(y, q) / 4.0)),
        ),
        (
            "OperatingIncomeLoss".to_string(),
            concept(filed_series(2022..=2024, |y, q| revenue(y, q) * (0.20 + 0.01 * f64::from(y - 2022)))),
        ),
        (
            "GrossProfit".to_string(),
            concept(filed_series(2023..=2024, |y, q| revenue(y, q) / 2.0)),
        ),
    ]);

    CompanyFacts {
        cik: Some(APPLE_CIK),
        entity_name: "Apple Inc.".to_string(),
        facts: HashMap::from([("us-gaap".to_string(), us_gaap)]),
    }
}

fn source() -> FakeSource {
    FakeSource {
        tickers: vec![
            ticker(APPLE_CIK, "AAPL", "Apple Inc."),
            ticker(DELISTED_CIK, "GONE", "Gone Corp"),
            ticker(OFFLINE_CIK, "DOWN", "Down Corp"),
        ],
        facts: HashMap::from([
            (
                Cik::from_number(APPLE_CIK),
                FactsFetch::Found(Box::new(apple_facts())),
            ),
            (
                Cik::from_number(OFFLINE_CIK),
                FactsFetch::Unavailable {
                    reason: "connection refused".to_string(),
                },
            ),
        ]),
        ..Default::default()
    }
}

fn is_quarter_label(label: &str) -> bool {
    let Some((period, year)) = label.split_once(' ') else {
        return false;
    };
    matches!(period, "Q1" | "Q2" | "Q3" | "Q4")
        && year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
}

#[tokio::test]
async fn test_quarterly_financials() {
    let source = Arc::new(source());
    let normalizer = FinancialsNormalizer::new(Arc::clone(&source));

    let entries = normalizer.quarterly_financials("aapl", 8).await.unwrap().unwrap();
    assert_eq!(entries.len(), 8);
    assert!(entries.iter().all(|e| is_quarter_label(&e.quarter_label)));
    assert!(entries.windows(2).all(|w| w[0].key() < w[1].key()));

    let first = &entries[0];
    assert_eq!(first.quarter_label, "Q1 2023");
    assert_eq!(first.date.to_string(), "2023-03-31");
    assert_eq!(first.revenue, Some(2301.0));

    // Q4 comes from the 10-K's three-month figure, not the full-year total
    let last = entries.last().unwrap();
    assert_eq!(last.quarter_label, "Q4 2024");
    assert_eq!(last.fiscal_period, FiscalPeriod::Q4);
    assert_eq!(last.revenue, Some(2404.0));
    assert_eq!(last.net_income, Some(601.0));
    assert_eq!(last.gross_profit, Some(1202.0));
}

#[tokio::test]
async fn test_financial_data() {
    let normalizer = FinancialsNormalizer::new(Arc::new(source()));

    let data = normalizer
        .financial_data("AAPL", DEFAULT_QUARTERS, DEFAULT_YEARS)
        .await
        .unwrap()
        .unwrap();

    assert!(data.has_quarterly);
    assert!(data.has_annual);
    assert_eq!(data.quarterly.len(), 12);
    assert_eq!(data.quarterly[0].quarter_label, "Q1 2022");
    // no gross profit reported before 2023
    assert_eq!(data.quarterly[0].gross_profit, None);

    // the stale SalesRevenueNet years are not merged in
    let labels: Vec<&str> = data.annual.iter().map(|e| e.quarter_label.as_str()).collect();
    assert_eq!(labels, ["FY 2022", "FY 2023", "FY 2024"]);
    let fy2024 = &data.annual[2];
    assert_eq!(fy2024.revenue, Some(2401.0 + 2402.0 + 2403.0 + 2404.0));
    assert_eq!(fy2024.date.to_string(), "2024-12-31");
}

#[tokio::test]
async fn test_unknown_ticker_is_none() {
    let source = Arc::new(source());
    let normalizer = FinancialsNormalizer::new(Arc::clone(&source));

    assert!(normalizer.resolve("ZZZZ").await.unwrap().is_none());
    assert!(normalizer.quarterly_financials("ZZZZ", 8).await.unwrap().is_none());
    assert!(normalizer.financial_data("ZZZZ", 8, 4).await.unwrap().is_none());
    assert_eq!(source.facts_calls(), 0);
}

#[tokio::test]
async fn test_missing_documents_are_none() {
    let normalizer = FinancialsNormalizer::new(Arc::new(source()));

    // 404 from the facts endpoint
    assert!(normalizer.financial_data("GONE", 8, 4).await.unwrap().is_none());
    // network failure
    assert!(normalizer.quarterly_financials("DOWN", 8).await.unwrap().is_none());

    let cik = normalizer.resolve("down").await.unwrap().unwrap();
    assert!(matches!(
        normalizer.fetch_facts(&cik).await,
        FactsFetch::Unavailable { .. }
    ));
}

#[tokio::test]
async fn test_empty_ticker_is_an_error() {
    let normalizer = FinancialsNormalizer::new(Arc::new(source()));
    let result = normalizer.financial_data("  ", 8, 4).await;
    assert!(matches!(result, Err(FactsError::InvalidParameter(_))));
}

#[tokio::test]
async fn test_index_loaded_once_and_retried_after_failure() {
    let source = Arc::new(source());
    source.fail_next_index.store(true, Ordering::SeqCst);
    let normalizer = FinancialsNormalizer::new(Arc::clone(&source));

    let result = normalizer.resolve("AAPL").await;
    assert!(matches!(result, Err(FactsError::Http { status: 503, .. })));
    assert!(!normalizer.resolver().cache().is_loaded());

    let cik = normalizer.resolve("AAPL").await.unwrap().unwrap();
    assert_eq!(cik.as_str(), "0000320193");
    normalizer.resolve("gone").await.unwrap();
    normalizer.quarterly_financials("AAPL", 4).await.unwrap();

    assert_eq!(source.index_calls(), 2);
}

#[tokio::test]
async fn test_cache_holds_found_documents_only() {
    let source = Arc::new(source());
    let cache = Arc::new(InMemoryCache::new());
    let normalizer = FinancialsNormalizer::new(Arc::clone(&source)).with_cache(cache.clone());

    normalizer.quarterly_financials("AAPL", 4).await.unwrap();
    normalizer.financial_data("AAPL", 4, 2).await.unwrap();
    assert_eq!(source.facts_calls(), 1);

    normalizer.quarterly_financials("GONE", 4).await.unwrap();
    normalizer.quarterly_financials("GONE", 4).await.unwrap();
    assert_eq!(source.facts_calls(), 3);

    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_company_name() {
    let normalizer = FinancialsNormalizer::new(Arc::new(source()));
    assert_eq!(
        normalizer.company_name("aapl").await.unwrap().as_deref(),
        Some("Apple Inc.")
    );
    assert!(normalizer.company_name("GONE").await.unwrap().is_none());
}

#[tokio::test]
async fn test_financial_trend() {
    let normalizer = FinancialsNormalizer::new(Arc::new(source()));

    let report = normalizer.financial_trend("AAPL").await.unwrap().unwrap();
    assert_eq!(report.symbol.as_str(), "AAPL");
    assert_eq!(report.quarterly.len(), 12);
    assert_eq!(report.annual.len(), 3);

    let q1_2023 = &report.quarterly[4];
    assert_eq!(q1_2023.entry.quarter_label, "Q1 2023");
    assert_eq!(q1_2023.net_margin, Some(25.0));
    assert_eq!(q1_2023.gross_margin, Some(50.0));
    // 2301 over 2201
    assert_eq!(q1_2023.revenue_growth_yoy, Some(4.5));

    // operating margin steps from 20% to 21% to 22% a year
    assert_eq!(report.latest_metrics.margin_trend, Some(Trend::Stable));
    assert_eq!(report.latest_metrics.profitability_trend, Some(Trend::Stable));
    assert_eq!(
        report.latest_metrics.revenue_growth,
        report.quarterly.last().unwrap().revenue_growth_yoy
    );

    let json = serde_json::to_value(q1_2023).unwrap();
    assert_eq!(json["quarterLabel"], "Q1 2023");
    assert_eq!(json["fiscalPeriod"], "Q1");
    assert_eq!(json["revenueGrowthYoY"], 4.5);
    assert!(json["netIncomeGrowthYoY"].is_number());
}

#[tokio::test]
async fn test_trend_is_none_without_data() {
    let mut source = source();
    source.facts.insert(
        Cik::from_number(DELISTED_CIK),
        FactsFetch::Found(Box::new(CompanyFacts::default())),
    );
    let normalizer = FinancialsNormalizer::new(Arc::new(source));

    let data = normalizer.financial_data("GONE", 8, 4).await.unwrap().unwrap();
    assert!(!data.has_quarterly);
    assert!(!data.has_annual);
    assert!(normalizer.financial_trend("GONE").await.unwrap().is_none());
}
