//! Facts CLI binary.
//!
//! Prints normalized income statement series for ticker symbols.

mod output;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use facts::{
    DEFAULT_FACTS_TTL, DEFAULT_QUARTERS, DEFAULT_USER_AGENT, DEFAULT_YEARS, FinancialsNormalizer,
    NormalizerBuilder,
};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "facts")]
#[command(about = "Normalized financials from SEC EDGAR company facts", long_about = None)]
#[command(version)]
struct Cli {
    /// User agent sent to SEC EDGAR ("AppName/Version (contact@email.com)")
    #[arg(long, env = "SEC_USER_AGENT", default_value = DEFAULT_USER_AGENT, global = true)]
    user_agent: String,

    /// SQLite file for caching company facts
    #[arg(long, env = "FACTS_CACHE", global = true)]
    cache: Option<PathBuf>,

    /// Cached document lifetime in minutes
    #[arg(long, default_value_t = DEFAULT_FACTS_TTL.as_secs() / 60, global = true)]
    ttl_minutes: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the most recent quarters
    Quarterly {
        /// Ticker symbol
        symbol: String,

        /// Number of quarters
        #[arg(short = 'n', long, default_value_t = DEFAULT_QUARTERS)]
        count: usize,
    },

    /// Show the most recent fiscal years
    Annual {
        /// Ticker symbol
        symbol: String,

        /// Number of years
        #[arg(short = 'n', long, default_value_t = DEFAULT_YEARS)]
        count: usize,
    },

    /// Show quarterly and annual series together
    Data {
        /// Ticker symbol
        symbol: String,

        /// Number of quarters
        #[arg(short, long, default_value_t = DEFAULT_QUARTERS)]
        quarters: usize,

        /// Number of years
        #[arg(short, long, default_value_t = DEFAULT_YEARS)]
        years: usize,
    },

    /// Show margins, growth and trends
    Report {
        /// Ticker symbol
        symbol: String,
    },

    /// Show the filer's registered name and CIK
    Name {
        /// Ticker symbol
        symbol: String,
    },

    /// Manage the facts cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Drop the cached document for a ticker
    Invalidate {
        /// Ticker symbol
        symbol: String,
    },

    /// Drop documents older than the TTL
    Prune,

    /// Drop every cached document
    Clear,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let normalizer = build_normalizer(&cli)?;
    let format = cli.format;

    match cli.command {
        Commands::Quarterly { symbol, count } => {
            match normalizer.quarterly_financials(&symbol, count).await? {
                Some(entries) => output::print_entries(&symbol, "Quarterly", &entries, format)?,
                None => output::no_data(&symbol),
            }
        }
        Commands::Annual { symbol, count } => {
            match normalizer.financial_data(&symbol, 0, count).await? {
                Some(data) => output::print_entries(&symbol, "Annual", &data.annual, format)?,
                None => output::no_data(&symbol),
            }
        }
        Commands::Data {
            symbol,
            quarters,
            years,
        } => match normalizer.financial_data(&symbol, quarters, years).await? {
            Some(data) => output::print_data(&symbol, &data, format)?,
            None => output::no_data(&symbol),
        },
        Commands::Report { symbol } => match normalizer.financial_trend(&symbol).await? {
            Some(report) => output::print_report(&report, format)?,
            None => output::no_data(&symbol),
        },
        Commands::Name { symbol } => {
            let cik = normalizer.resolve(&symbol).await?;
            let name = match &cik {
                Some(_) => normalizer.company_name(&symbol).await?,
                None => None,
            };
            output::print_name(&symbol, cik.as_ref(), name.as_deref(), format)?;
        }
        Commands::Cache { action } => manage_cache(&normalizer, action).await?,
    }

    Ok(())
}

fn build_normalizer(cli: &Cli) -> Result<FinancialsNormalizer> {
    let mut builder =
        NormalizerBuilder::new(&cli.user_agent).with_facts_ttl_minutes(cli.ttl_minutes);

    if let Some(path) = &cli.cache {
        debug!(path = %path.display(), "Using SQLite cache");
        builder = builder
            .with_sqlite_cache(path)
            .with_context(|| format!("Failed to open cache at {}", path.display()))?;
    }

    Ok(builder.build()?)
}

async fn manage_cache(normalizer: &FinancialsNormalizer, action: CacheAction) -> Result<()> {
    let Some(cache) = normalizer.cache() else {
        bail!("No cache configured; pass --cache or set FACTS_CACHE");
    };

    match action {
        CacheAction::Invalidate { symbol } => {
            let Some(cik) = normalizer.resolve(&symbol).await? else {
                bail!("Unknown ticker: {symbol}");
            };
            if cache.invalidate(&cik).await? {
                println!("Invalidated cached facts for {symbol} (CIK {cik})");
            } else {
                println!("Nothing cached for {symbol} (CIK {cik})");
            }
        }
        CacheAction::Prune => {
            let removed = cache.invalidate_stale(normalizer.facts_ttl()).await?;
            println!("Removed {removed} stale entries");
        }
        CacheAction::Clear => {
            cache.clear().await?;
            println!("Cache cleared");
        }
    }

    Ok(())
}
