//! Price history fetching from Yahoo Finance.

use crate::error::{DataError, Result};
use crate::types::{HistoryInterval, HistoryRange};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use yahoo_finance_api as yahoo;

/// Yahoo Finance price-history provider with rate limiting.
pub struct YahooQuoteProvider {
    provider: yahoo::YahooConnector,
    rate_limit_delay: Duration,
}

impl std::fmt::Debug for YahooQuoteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooQuoteProvider")
            .field("rate_limit_delay", &self.rate_limit_delay)
            .finish_non_exhaustive()
    }
}

impl YahooQuoteProvider {
    /// Create a new provider with default rate limiting (1 req/sec).
    pub fn new() -> Self {
        Self::with_rate_limit(Duration::from_millis(1000))
    }

    /// Create a new provider with custom rate limiting.
    pub fn with_rate_limit(rate_limit_delay: Duration) -> Self {
        Self {
            provider: yahoo::YahooConnector::new().expect("Failed to create Yahoo connector"),
            rate_limit_delay,
        }
    }

    /// Fetch OHLCV history for a symbol over a trailing window.
    ///
    /// # Arguments
    /// * `symbol` - The ticker symbol (e.g., "AAPL")
    /// * `range` - Trailing window (1y/2y/5y/10y)
    /// * `interval` - Bar interval (1d/1wk/1mo)
    ///
    /// # Returns
    /// A Polars DataFrame with columns: date, open, high, low, close,
    /// volume, adjusted_close
    pub async fn fetch_history(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: HistoryInterval,
    ) -> Result<DataFrame> {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let response = self
            .provider
            .get_quote_range(symbol, interval.as_str(), range.as_str())
            .await?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::YahooApi(e.to_string()))?;

        if quotes.is_empty() {
            return Err(DataError::MissingData {
                symbol: symbol.to_string(),
                reason: "No data returned from Yahoo Finance".to_string(),
            });
        }

        let timestamps: Vec<i64> = quotes.iter().map(|q| q.timestamp).collect();
        let opens: Vec<f64> = quotes.iter().map(|q| q.open).collect();
        let highs: Vec<f64> = quotes.iter().map(|q| q.high).collect();
        let lows: Vec<f64> = quotes.iter().map(|q| q.low).collect();
        let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
        let volumes: Vec<u64> = quotes.iter().map(|q| q.volume).collect();
        let adj_closes: Vec<f64> = quotes.iter().map(|q| q.adjclose).collect();

        let df = DataFrame::new(vec![
            Series::new("timestamp".into(), timestamps).into(),
            Series::new("open".into(), opens).into(),
            Series::new("high".into(), highs).into(),
            Series::new("low".into(), lows).into(),
            Series::new("close".into(), closes).into(),
            Series::new("volume".into(), volumes).into(),
            Series::new("adjusted_close".into(), adj_closes).into(),
        ])?;

        // Convert timestamp to date
        let df = df
            .lazy()
            .with_column(
                (col("timestamp") * lit(1_000_000_000))
                    .cast(DataType::Datetime(TimeUnit::Nanoseconds, None))
                    .cast(DataType::Date)
                    .alias("date"),
            )
            .select(&[
                col("date"),
                col("open"),
                col("high"),
                col("low"),
                col("close"),
                col("volume"),
                col("adjusted_close"),
            ])
            .collect()?;

        // Apply rate limiting
        sleep(self.rate_limit_delay).await;

        Ok(df)
    }
}

impl Default for YahooQuoteProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact description of a fetched price-history window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// First bar date in the window.
    pub start_date: String,
    /// Last bar date in the window.
    pub end_date: String,
    /// Close of the first bar.
    pub first_close: f64,
    /// Close of the last bar.
    pub last_close: f64,
    /// Percentage change from first to last close.
    pub change_pct: f64,
    /// Highest high over the window.
    pub high: f64,
    /// Lowest low over the window.
    pub low: f64,
}

/// Summarize a history frame produced by [`YahooQuoteProvider::fetch_history`].
///
/// Returns `Ok(None)` for an empty frame.
pub fn summarize(history: &DataFrame) -> Result<Option<HistorySummary>> {
    if history.height() == 0 {
        return Ok(None);
    }

    let closes = history.column("close")?.f64()?;
    let dates = history.column("date")?.cast(&DataType::String)?;
    let dates = dates.str()?;

    let (Some(first_close), Some(last_close)) = (closes.get(0), closes.get(closes.len() - 1))
    else {
        return Ok(None);
    };

    let high = history.column("high")?.f64()?.max().unwrap_or(last_close);
    let low = history.column("low")?.f64()?.min().unwrap_or(last_close);
    let change_pct = if first_close == 0.0 {
        0.0
    } else {
        (last_close - first_close) / first_close * 100.0
    };

    Ok(Some(HistorySummary {
        start_date: dates.get(0).unwrap_or_default().to_string(),
        end_date: dates.get(dates.len() - 1).unwrap_or_default().to_string(),
        first_close,
        last_close,
        change_pct,
        high,
        low,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn history_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("date".into(), vec!["2024-01-02", "2024-06-28"]).into(),
            Series::new("open".into(), vec![10.0, 11.5]).into(),
            Series::new("high".into(), vec![12.5, 13.0]).into(),
            Series::new("low".into(), vec![9.5, 10.8]).into(),
            Series::new("close".into(), vec![10.0, 12.0]).into(),
            Series::new("volume".into(), vec![1_000u64, 2_000u64]).into(),
            Series::new("adjusted_close".into(), vec![10.0, 12.0]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_summarize_window() {
        let summary = summarize(&history_frame()).unwrap().unwrap();
        assert_eq!(summary.start_date, "2024-01-02");
        assert_eq!(summary.end_date, "2024-06-28");
        assert_relative_eq!(summary.change_pct, 20.0);
        assert_relative_eq!(summary.high, 13.0);
        assert_relative_eq!(summary.low, 9.5);
    }

    #[test]
    fn test_summarize_empty_frame() {
        assert_eq!(summarize(&DataFrame::empty()).unwrap(), None);
    }
}
