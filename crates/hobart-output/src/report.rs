//! Analysis report assembly and terminal rendering.

use chrono::{DateTime, Utc};
use hobart_data::IssuerInfo;
use hobart_ratios::RatioRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A complete analysis result for one ticker query.
///
/// Owned by the query that produced it and discarded when the next query
/// runs; nothing here persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Ticker symbol that was analyzed.
    pub ticker: String,

    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,

    /// Issuer metadata as returned by the provider.
    pub issuer: IssuerInfo,

    /// Per-period ratio records in reference-table column order.
    pub records: Vec<RatioRecord>,

    /// Commentary sentences for the latest period.
    pub commentary: Vec<String>,

    /// Informational diagnostics, one per ratio that never computed.
    pub diagnostics: Vec<String>,
}

impl AnalysisReport {
    /// Create a new report stamped with the current time.
    pub fn new(
        ticker: String,
        issuer: IssuerInfo,
        records: Vec<RatioRecord>,
        commentary: Vec<String>,
        diagnostics: Vec<String>,
    ) -> Self {
        Self {
            ticker,
            generated_at: Utc::now(),
            issuer,
            records,
            commentary,
            diagnostics,
        }
    }

    /// Convert report to a pretty JSON string.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Format ratio records as an ASCII table for terminal display.
///
/// Profitability ratios render as percentages, liquidity ratios to two
/// decimals, and missing values as a dash.
pub fn format_ratio_table(records: &[RatioRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<14} {:>10} {:>10} {:>15} {:>13}\n",
        "Period", "ROA", "ROE", "Current Ratio", "Quick Ratio"
    ));
    output.push_str(&"-".repeat(66));
    output.push('\n');

    for record in records {
        output.push_str(&format!(
            "{:<14} {:>10} {:>10} {:>15} {:>13}\n",
            record.period,
            fmt_pct(record.roa),
            fmt_pct(record.roe),
            fmt_value(record.current_ratio),
            fmt_value(record.quick_ratio),
        ));
    }

    output
}

/// Format the issuer KPI header shown above the ratio table.
pub fn format_issuer_header(ticker: &str, issuer: &IssuerInfo) -> String {
    let mut output = String::new();

    let name = issuer.name.as_deref().unwrap_or(ticker);
    output.push_str(&format!("{name} ({ticker})\n"));

    if let Some(exchange) = &issuer.exchange {
        output.push_str(&format!("Exchange:       {exchange}\n"));
    }
    output.push_str(&format!(
        "Market Cap:     {}\n",
        issuer
            .market_cap
            .map_or_else(|| "N/A".to_string(), |v| format!("${}", group_thousands(v)))
    ));
    output.push_str(&format!(
        "Trailing P/E:   {}\n",
        issuer
            .trailing_pe
            .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
    ));
    output.push_str(&format!(
        "Profit Margin:  {}\n",
        issuer
            .profit_margin
            .map_or_else(|| "N/A".to_string(), |v| format!("{:.2}%", v * 100.0))
    ));
    output.push_str(&format!(
        "Previous Close: {}\n",
        issuer
            .previous_close
            .map_or_else(|| "N/A".to_string(), |v| format!("${v:.2}"))
    ));

    output
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn fmt_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// Group an amount into thousands-separated integer notation.
fn group_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}
