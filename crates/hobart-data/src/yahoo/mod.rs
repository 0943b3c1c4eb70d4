//! Yahoo Finance data fetching.

pub mod fundamentals;
pub mod quotes;

pub use fundamentals::{IssuerInfo, StatementBundle, YahooFundamentalsProvider};
pub use quotes::{HistorySummary, YahooQuoteProvider};

use crate::error::Result;
use crate::statement::StatementTable;
use crate::types::{HistoryInterval, HistoryRange, StatementFrequency};
use polars::prelude::DataFrame;
use tracing::warn;

/// Everything fetched for one ticker query.
///
/// Each table may be empty and the issuer mapping may be entirely blank;
/// only a failed statement fetch aborts the query.
#[derive(Debug, Clone)]
pub struct CompanyData {
    /// Income statement (periods as columns).
    pub income_statement: StatementTable,
    /// Balance sheet.
    pub balance_sheet: StatementTable,
    /// Cash-flow statement.
    pub cash_flow: StatementTable,
    /// OHLCV price history; empty frame when unavailable.
    pub history: DataFrame,
    /// Issuer metadata.
    pub issuer: IssuerInfo,
}

/// Combined provider for statements, issuer metadata and price history.
#[derive(Debug)]
pub struct CompanyDataProvider {
    fundamentals: YahooFundamentalsProvider,
    quotes: YahooQuoteProvider,
}

impl CompanyDataProvider {
    /// Create a provider with default rate limiting.
    pub fn new() -> Self {
        Self {
            fundamentals: YahooFundamentalsProvider::new(),
            quotes: YahooQuoteProvider::new(),
        }
    }

    /// Fetch statements, issuer metadata and price history for one ticker.
    ///
    /// Statement retrieval failure is the query's failure. Price history is
    /// ancillary: on error it degrades to an empty frame with a warning.
    pub async fn fetch(
        &self,
        symbol: &str,
        frequency: StatementFrequency,
        range: HistoryRange,
        interval: HistoryInterval,
    ) -> Result<CompanyData> {
        let bundle = self.fundamentals.fetch_statements(symbol, frequency).await?;

        let history = match self.quotes.fetch_history(symbol, range, interval).await {
            Ok(frame) => frame,
            Err(err) => {
                warn!(symbol, error = %err, "price history unavailable");
                DataFrame::empty()
            }
        };

        Ok(CompanyData {
            income_statement: bundle.income_statement,
            balance_sheet: bundle.balance_sheet,
            cash_flow: bundle.cash_flow,
            history,
            issuer: bundle.issuer,
        })
    }
}

impl Default for CompanyDataProvider {
    fn default() -> Self {
        Self::new()
    }
}
