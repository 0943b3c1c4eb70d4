//! Financial statement and issuer metadata fetching from Yahoo Finance.
//!
//! The quoteSummary endpoint returns each statement as a list of per-period
//! objects keyed by camelCase account names. The keys are not a stable
//! vocabulary — they vary across companies, regions, and endpoint versions —
//! so the tables built here preserve the vendor labels verbatim (re-spaced
//! from camelCase) and leave the interpretation to the ratio layer.

use crate::error::{DataError, Result};
use crate::statement::{StatementRow, StatementTable};
use crate::types::StatementFrequency;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Issuer metadata attached to a statement query.
///
/// Every field is optional; the provider may return an empty mapping for
/// thinly-covered tickers and the rest of the pipeline must not care.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuerInfo {
    /// Company long name.
    pub name: Option<String>,
    /// Trading currency.
    pub currency: Option<String>,
    /// Exchange display name.
    pub exchange: Option<String>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Trailing price/earnings ratio.
    pub trailing_pe: Option<f64>,
    /// Trailing profit margin (fraction, not percent).
    pub profit_margin: Option<f64>,
    /// Previous session close price.
    pub previous_close: Option<f64>,
}

/// The three statements plus issuer metadata for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementBundle {
    /// Income statement (periods as columns).
    pub income_statement: StatementTable,
    /// Balance sheet.
    pub balance_sheet: StatementTable,
    /// Cash-flow statement.
    pub cash_flow: StatementTable,
    /// Issuer metadata.
    pub issuer: IssuerInfo,
}

/// Yahoo Finance statement provider.
#[derive(Debug)]
pub struct YahooFundamentalsProvider {
    client: reqwest::Client,
    rate_limit_delay: Duration,
}

impl YahooFundamentalsProvider {
    /// Create a new provider with default rate limiting (1 req/sec).
    pub fn new() -> Self {
        Self::with_rate_limit(Duration::from_millis(1000))
    }

    /// Create a new provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)")
                .build()
                .expect("Failed to create HTTP client"),
            rate_limit_delay,
        }
    }

    /// Fetch the income statement, balance sheet, cash-flow statement and
    /// issuer metadata for a symbol.
    ///
    /// A statement module the provider omits degrades to an empty table;
    /// transport and provider errors surface as a single opaque [`DataError`].
    pub async fn fetch_statements(
        &self,
        symbol: &str,
        frequency: StatementFrequency,
    ) -> Result<StatementBundle> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let modules = match frequency {
            StatementFrequency::Annual => {
                "incomeStatementHistory,balanceSheetHistory,cashflowStatementHistory,\
                 price,summaryDetail,financialData"
            }
            StatementFrequency::Quarterly => {
                "incomeStatementHistoryQuarterly,balanceSheetHistoryQuarterly,\
                 cashflowStatementHistoryQuarterly,price,summaryDetail,financialData"
            }
        };

        let url = format!("{QUOTE_SUMMARY_URL}/{symbol}");
        let response = self
            .client
            .get(&url)
            .query(&[("modules", modules), ("formatted", "false")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DataError::Http(format!(
                "Failed to fetch statements for {}: {}",
                symbol,
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        let bundle = parse_bundle(&body, symbol, frequency);

        // Apply rate limiting
        sleep(self.rate_limit_delay).await;

        bundle
    }
}

impl Default for YahooFundamentalsProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a full quoteSummary response body into a statement bundle.
fn parse_bundle(
    body: &Value,
    symbol: &str,
    frequency: StatementFrequency,
) -> Result<StatementBundle> {
    let summary = body
        .get("quoteSummary")
        .ok_or_else(|| DataError::Parse("missing quoteSummary envelope".to_string()))?;

    if let Some(error) = summary.get("error")
        && !error.is_null()
    {
        let description = error
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("unknown provider error");
        return Err(DataError::YahooApi(description.to_string()));
    }

    let result = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|r| r.first())
        .ok_or_else(|| DataError::MissingData {
            symbol: symbol.to_string(),
            reason: "empty quoteSummary result".to_string(),
        })?;

    let (income_module, balance_module, cashflow_module) = match frequency {
        StatementFrequency::Annual => (
            "incomeStatementHistory",
            "balanceSheetHistory",
            "cashflowStatementHistory",
        ),
        StatementFrequency::Quarterly => (
            "incomeStatementHistoryQuarterly",
            "balanceSheetHistoryQuarterly",
            "cashflowStatementHistoryQuarterly",
        ),
    };

    Ok(StatementBundle {
        income_statement: parse_statement(result, income_module)?,
        balance_sheet: parse_statement(result, balance_module)?,
        cash_flow: parse_statement(result, cashflow_module)?,
        issuer: parse_issuer(result),
    })
}

/// Extract one statement module as a table; a missing module is an empty
/// table, not an error.
fn parse_statement(result: &Value, module: &str) -> Result<StatementTable> {
    let Some(module_value) = result.get(module) else {
        debug!(module, "statement module absent from provider response");
        return Ok(StatementTable::empty());
    };

    let entries = statement_entries(module_value);
    if entries.is_empty() {
        return Ok(StatementTable::empty());
    }

    table_from_entries(&entries)
}

/// Locate the per-period entry list inside a statement module.
///
/// Annual and quarterly modules nest the list under slightly different keys,
/// so fall back to the first array-valued field when the known names miss.
fn statement_entries(module: &Value) -> Vec<Value> {
    let Some(object) = module.as_object() else {
        return Vec::new();
    };

    for key in [
        "incomeStatementHistory",
        "balanceSheetStatements",
        "cashflowStatements",
    ] {
        if let Some(entries) = object.get(key).and_then(Value::as_array) {
            return entries.clone();
        }
    }

    object
        .values()
        .find_map(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Build a statement table from the provider's per-period keyed objects.
///
/// Columns follow the entry order (most recent first by provider
/// convention); rows follow first appearance of each account key across all
/// periods, so periods with extra or missing accounts still line up.
fn table_from_entries(entries: &[Value]) -> Result<StatementTable> {
    let periods: Vec<String> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| period_label(entry.get("endDate"), idx))
        .collect();

    let mut keys: Vec<String> = Vec::new();
    for entry in entries {
        if let Some(object) = entry.as_object() {
            for key in object.keys() {
                if key != "endDate" && key != "maxAge" && !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
    }

    let rows = keys
        .iter()
        .map(|key| {
            let values = entries
                .iter()
                .map(|entry| entry.get(key).and_then(cell_value))
                .collect();
            StatementRow::new(label_from_key(key), values)
        })
        .collect();

    StatementTable::new(periods, rows)
}

/// Derive a period label from a column's end date, falling back to the raw
/// value (or the column position) when it is not date-like.
fn period_label(end_date: Option<&Value>, idx: usize) -> String {
    let Some(value) = end_date else {
        return idx.to_string();
    };

    if let Some(ts) = value.as_i64().or_else(|| value.get("raw").and_then(Value::as_i64))
        && let Some(date) = DateTime::from_timestamp(ts, 0)
    {
        return date.date_naive().format("%Y-%m-%d").to_string();
    }

    if let Some(fmt) = value.as_str().or_else(|| value.get("fmt").and_then(Value::as_str)) {
        return fmt.to_string();
    }

    idx.to_string()
}

/// Coerce a statement cell to a number; anything unparseable is missing.
fn cell_value(value: &Value) -> Option<f64> {
    if let Some(n) = value.as_f64() {
        return Some(n);
    }
    if let Some(raw) = value.get("raw").and_then(Value::as_f64) {
        return Some(raw);
    }
    value.as_str().and_then(|s| s.trim().parse::<f64>().ok())
}

/// Re-space a camelCase vendor key into a display label, e.g.
/// `totalCurrentAssets` -> `Total Current Assets`.
fn label_from_key(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (idx, ch) in key.chars().enumerate() {
        if idx == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_ascii_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    label
}

/// Pull issuer metadata out of the price/summaryDetail/financialData modules.
fn parse_issuer(result: &Value) -> IssuerInfo {
    let price = result.get("price");
    let summary = result.get("summaryDetail");
    let financial = result.get("financialData");

    IssuerInfo {
        name: str_field(price, "longName").or_else(|| str_field(price, "shortName")),
        currency: str_field(price, "currency"),
        exchange: str_field(price, "exchangeName"),
        market_cap: num_field(price, "marketCap").or_else(|| num_field(summary, "marketCap")),
        trailing_pe: num_field(summary, "trailingPE"),
        profit_margin: num_field(financial, "profitMargins"),
        previous_close: num_field(summary, "previousClose")
            .or_else(|| num_field(price, "regularMarketPreviousClose")),
    }
}

fn num_field(object: Option<&Value>, key: &str) -> Option<f64> {
    object?.get(key).and_then(cell_value)
}

fn str_field(object: Option<&Value>, key: &str) -> Option<String> {
    let value = object?.get(key)?;
    value
        .as_str()
        .or_else(|| value.get("fmt").and_then(Value::as_str))
        .map(str::to_string)
}
