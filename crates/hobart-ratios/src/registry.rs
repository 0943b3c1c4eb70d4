//! Line-item and ratio registry.
//!
//! Central tables for the semantic accounts the engine extracts and the
//! ratios derived from them. Candidate label lists are ordered by
//! preference, most specific first; supporting a new vendor vocabulary
//! means adding a label here, not touching the resolution algorithm.

use serde::{Deserialize, Serialize};

/// Semantic accounts resolved from statement tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    /// Bottom-line earnings from the income statement.
    NetIncome,
    /// Total assets from the balance sheet.
    TotalAssets,
    /// Total shareholders' equity.
    TotalEquity,
    /// Assets convertible within one year.
    CurrentAssets,
    /// Obligations due within one year.
    CurrentLiabilities,
    /// Inventory carried on the balance sheet.
    Inventory,
}

impl LineItem {
    /// Known vendor label variants for this account, in priority order.
    #[must_use]
    pub const fn candidate_labels(&self) -> &'static [&'static str] {
        match self {
            Self::NetIncome => &[
                "Net Income",
                "NetIncome",
                "Net Income Applicable To Common Stockholders",
                "Net earnings",
            ],
            Self::TotalAssets => &["Total Assets", "TotalAssets"],
            Self::TotalEquity => &[
                "Total Stockholder Equity",
                "Total Equity",
                "TotalStockholderEquity",
            ],
            Self::CurrentAssets => &[
                "Total Current Assets",
                "Total Current Assets (Gross)",
                "Current Assets",
            ],
            Self::CurrentLiabilities => &["Total Current Liabilities", "Current Liabilities"],
            Self::Inventory => &["Inventory", "Total Inventory"],
        }
    }

    /// Human-readable account name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NetIncome => "Net Income",
            Self::TotalAssets => "Total Assets",
            Self::TotalEquity => "Total Equity",
            Self::CurrentAssets => "Total Current Assets",
            Self::CurrentLiabilities => "Total Current Liabilities",
            Self::Inventory => "Inventory",
        }
    }
}

/// Ratios computed per reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ratio {
    /// Net income / total assets.
    ReturnOnAssets,
    /// Net income / total equity.
    ReturnOnEquity,
    /// Current assets / current liabilities.
    CurrentRatio,
    /// (Current assets - inventory) / current liabilities.
    QuickRatio,
}

impl Ratio {
    /// All ratios in fixed presentation order.
    pub const ALL: [Self; 4] = [
        Self::ReturnOnAssets,
        Self::ReturnOnEquity,
        Self::CurrentRatio,
        Self::QuickRatio,
    ];

    /// Column and display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReturnOnAssets => "ROA",
            Self::ReturnOnEquity => "ROE",
            Self::CurrentRatio => "Current Ratio",
            Self::QuickRatio => "Quick Ratio",
        }
    }

    /// Line items this ratio consumes, used when reporting why a ratio
    /// could not be computed.
    #[must_use]
    pub const fn inputs(&self) -> &'static [LineItem] {
        match self {
            Self::ReturnOnAssets => &[LineItem::NetIncome, LineItem::TotalAssets],
            Self::ReturnOnEquity => &[LineItem::NetIncome, LineItem::TotalEquity],
            Self::CurrentRatio => &[LineItem::CurrentAssets, LineItem::CurrentLiabilities],
            Self::QuickRatio => &[
                LineItem::CurrentAssets,
                LineItem::Inventory,
                LineItem::CurrentLiabilities,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_lists_are_nonempty() {
        for item in [
            LineItem::NetIncome,
            LineItem::TotalAssets,
            LineItem::TotalEquity,
            LineItem::CurrentAssets,
            LineItem::CurrentLiabilities,
            LineItem::Inventory,
        ] {
            assert!(!item.candidate_labels().is_empty());
        }
    }

    #[test]
    fn test_ratio_inputs_named() {
        assert_eq!(Ratio::ReturnOnAssets.inputs()[1].name(), "Total Assets");
        assert_eq!(Ratio::ALL.len(), 4);
    }
}
