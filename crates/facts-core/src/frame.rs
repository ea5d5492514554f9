//! DataFrame export for financial series.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{FactsError, Result};
use crate::types::{DerivedEntry, FinancialEntry};

/// Builds a DataFrame with one row per entry.
///
/// Columns: date, label, fiscal_year, fiscal_period, revenue, net_income,
/// operating_income, gross_profit.
///
/// # Errors
/// Returns [`FactsError::Frame`] if polars rejects the columns.
pub fn entries_frame(entries: &[FinancialEntry]) -> Result<DataFrame> {
    DataFrame::new(entry_columns(entries.iter())?).map_err(|e| FactsError::Frame(e.to_string()))
}

/// Builds a DataFrame of derived entries: the [`entries_frame`] columns plus
/// gross_margin, operating_margin, net_margin, revenue_growth_yoy and
/// net_income_growth_yoy.
///
/// # Errors
/// Returns [`FactsError::Frame`] if polars rejects the columns.
pub fn derived_frame(entries: &[DerivedEntry]) -> Result<DataFrame> {
    let mut columns = entry_columns(entries.iter().map(|d| &d.entry))?;
    let derived: [(&str, fn(&DerivedEntry) -> Option<f64>); 5] = [
        ("gross_margin", |d| d.gross_margin),
        ("operating_margin", |d| d.operating_margin),
        ("net_margin", |d| d.net_margin),
        ("revenue_growth_yoy", |d| d.revenue_growth_yoy),
        ("net_income_growth_yoy", |d| d.net_income_growth_yoy),
    ];
    for (name, get) in derived {
        let values: Vec<Option<f64>> = entries.iter().map(get).collect();
        columns.push(Column::new(name.into(), values));
    }
    DataFrame::new(columns).map_err(|e| FactsError::Frame(e.to_string()))
}

fn entry_columns<'a>(entries: impl Iterator<Item = &'a FinancialEntry>) -> Result<Vec<Column>> {
    let entries: Vec<&FinancialEntry> = entries.collect();
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
        .ok_or_else(|| FactsError::Other("Invalid epoch".to_string()))?;

    // Polars dates are days since the Unix epoch
    let dates: Vec<i32> = entries
        .iter()
        .map(|e| (e.date - epoch).num_days() as i32)
        .collect();
    let date_col = Column::new("date".into(), dates)
        .cast(&DataType::Date)
        .map_err(|e| FactsError::Frame(e.to_string()))?;

    let labels: Vec<&str> = entries.iter().map(|e| e.quarter_label.as_str()).collect();
    let years: Vec<i32> = entries.iter().map(|e| e.fiscal_year).collect();
    let periods: Vec<&str> = entries.iter().map(|e| e.fiscal_period.as_str()).collect();
    let revenue: Vec<Option<f64>> = entries.iter().map(|e| e.revenue).collect();
    let net_income: Vec<Option<f64>> = entries.iter().map(|e| e.net_income).collect();
    let operating_income: Vec<Option<f64>> = entries.iter().map(|e| e.operating_income).collect();
    let gross_profit: Vec<Option<f64>> = entries.iter().map(|e| e.gross_profit).collect();

    Ok(vec![
        date_col,
        Column::new("label".into(), labels),
        Column::new("fiscal_year".into(), years),
        Column::new("fiscal_period".into(), periods),
        Column::new("revenue".into(), revenue),
        Column::new("net_income".into(), net_income),
        Column::new("operating_income".into(), operating_income),
        Column::new("gross_profit".into(), gross_profit),
    ])
}
