//! XBRL concept labels for each income statement metric.

/// An income statement line item tracked by the normalizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Total revenue.
    Revenue,
    /// Net income.
    NetIncome,
    /// Operating income.
    OperatingIncome,
    /// Gross profit.
    GrossProfit,
}

impl Metric {
    /// All tracked metrics.
    pub const ALL: [Self; 4] = [
        Self::Revenue,
        Self::NetIncome,
        Self::OperatingIncome,
        Self::GrossProfit,
    ];

    /// US GAAP concept labels that may carry this metric, in order of preference.
    ///
    /// Different filers use different labels for the same line item depending
    /// on taxonomy version and preference.
    #[must_use]
    pub const fn concepts(&self) -> &'static [&'static str] {
        match self {
            Self::Revenue => &[
                "Revenues",
                "RevenueFromContractWithCustomerExcludingAssessedTax",
                "SalesRevenueNet",
                "TotalRevenuesAndOtherIncome",
                "RevenueFromContractWithCustomerIncludingAssessedTax",
            ],
            Self::NetIncome => &[
                "NetIncomeLoss",
                "NetIncomeLossAvailableToCommonStockholdersBasic",
                "ProfitLoss",
            ],
            Self::OperatingIncome => &["OperatingIncomeLoss", "IncomeLossFromOperations"],
            Self::GrossProfit => &["GrossProfit"],
        }
    }
}
