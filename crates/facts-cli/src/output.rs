//! Text and JSON rendering.

use anyhow::Result;
use facts::{Cik, DerivedEntry, FinancialData, FinancialEntry, FinancialTrendReport, Trend};
use serde::Serialize;

use crate::Format;

pub(crate) fn no_data(symbol: &str) {
    println!("No financial data available for {}", symbol.to_uppercase());
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("JSON serialization error: {}", e))?;
    println!("{}", json);
    Ok(())
}

pub(crate) fn print_entries(
    symbol: &str,
    title: &str,
    entries: &[FinancialEntry],
    format: Format,
) -> Result<()> {
    if format == Format::Json {
        return print_json(entries);
    }

    println!("\n{} financials: {}\n", title, symbol.to_uppercase());
    entries_table(entries);
    Ok(())
}

pub(crate) fn print_data(symbol: &str, data: &FinancialData, format: Format) -> Result<()> {
    if format == Format::Json {
        return print_json(data);
    }

    print_entries(symbol, "Quarterly", &data.quarterly, format)?;
    print_entries(symbol, "Annual", &data.annual, format)
}

pub(crate) fn print_report(report: &FinancialTrendReport, format: Format) -> Result<()> {
    if format == Format::Json {
        return print_json(report);
    }

    println!("\nFinancial trends: {} ({})\n", report.symbol, report.currency);

    let latest = &report.latest_metrics;
    println!("Revenue growth (YoY): {}", percent(latest.revenue_growth));
    println!("Operating margin:     {}", trend(latest.margin_trend));
    println!("Net margin:           {}", trend(latest.profitability_trend));

    if report.has_quarterly {
        println!("\nQuarterly\n");
        derived_table(&report.quarterly);
    }
    if report.has_annual {
        println!("\nAnnual\n");
        derived_table(&report.annual);
    }
    Ok(())
}

pub(crate) fn print_name(
    symbol: &str,
    cik: Option<&Cik>,
    name: Option<&str>,
    format: Format,
) -> Result<()> {
    if format == Format::Json {
        return print_json(&serde_json::json!({
            "symbol": symbol.to_uppercase(),
            "cik": cik,
            "name": name,
        }));
    }

    match (cik, name) {
        (Some(cik), Some(name)) => println!("{}: {} (CIK {})", symbol.to_uppercase(), name, cik),
        (Some(cik), None) => println!("{}: CIK {}", symbol.to_uppercase(), cik),
        (None, _) => println!("{}: not found", symbol.to_uppercase()),
    }
    Ok(())
}

fn entries_table(entries: &[FinancialEntry]) {
    println!(
        "{:<10} {:<12} {:>14} {:>14} {:>14} {:>14}",
        "Period", "End", "Revenue", "Net income", "Op. income", "Gross profit"
    );
    for e in entries {
        println!(
            "{:<10} {:<12} {:>14} {:>14} {:>14} {:>14}",
            e.quarter_label,
            e.date,
            millions(e.revenue),
            millions(e.net_income),
            millions(e.operating_income),
            millions(e.gross_profit),
        );
    }
}

fn derived_table(entries: &[DerivedEntry]) {
    println!(
        "{:<10} {:>14} {:>9} {:>9} {:>9} {:>10} {:>10}",
        "Period", "Revenue", "Gross", "Op.", "Net", "Rev YoY", "NI YoY"
    );
    for d in entries {
        println!(
            "{:<10} {:>14} {:>9} {:>9} {:>9} {:>10} {:>10}",
            d.entry.quarter_label,
            millions(d.entry.revenue),
            percent(d.gross_margin),
            percent(d.operating_margin),
            percent(d.net_margin),
            percent(d.revenue_growth_yoy),
            percent(d.net_income_growth_yoy),
        );
    }
}

fn millions(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}M", v / 1_000_000.0))
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}%"))
}

fn trend(value: Option<Trend>) -> &'static str {
    match value {
        Some(Trend::Improving) => "improving",
        Some(Trend::Stable) => "stable",
        Some(Trend::Declining) => "declining",
        None => "n/a",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_formatting() {
        assert_eq!(millions(Some(94_930_000_000.0)), "94930.0M");
        assert_eq!(millions(None), "-");
        assert_eq!(percent(Some(-12.5)), "-12.5%");
        assert_eq!(percent(None), "-");
        assert_eq!(trend(Some(Trend::Declining)), "declining");
        assert_eq!(trend(None), "n/a");
    }
}
