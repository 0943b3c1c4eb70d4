//! Query parameter types for statement and price-history requests.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reporting frequency for fetched statements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementFrequency {
    /// Annual reporting periods.
    #[default]
    Annual,
    /// Quarterly reporting periods.
    Quarterly,
}

impl StatementFrequency {
    /// Wire string used by the statement provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for StatementFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatementFrequency {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "annual" => Ok(Self::Annual),
            "quarterly" => Ok(Self::Quarterly),
            other => Err(DataError::InvalidParameter(format!(
                "unknown statement frequency: {other}"
            ))),
        }
    }
}

/// Look-back window for price history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryRange {
    /// One year of history.
    #[default]
    OneYear,
    /// Two years of history.
    TwoYears,
    /// Five years of history.
    FiveYears,
    /// Ten years of history.
    TenYears,
}

impl HistoryRange {
    /// Wire string used by the price-history provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneYear => "1y",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1y" => Ok(Self::OneYear),
            "2y" => Ok(Self::TwoYears),
            "5y" => Ok(Self::FiveYears),
            "10y" => Ok(Self::TenYears),
            other => Err(DataError::InvalidParameter(format!(
                "unknown history range: {other}"
            ))),
        }
    }
}

/// Sampling interval for price history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryInterval {
    /// Daily bars.
    #[default]
    Daily,
    /// Weekly bars.
    Weekly,
    /// Monthly bars.
    Monthly,
}

impl HistoryInterval {
    /// Wire string used by the price-history provider.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "1d",
            Self::Weekly => "1wk",
            Self::Monthly => "1mo",
        }
    }
}

impl fmt::Display for HistoryInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryInterval {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1d" => Ok(Self::Daily),
            "1wk" => Ok(Self::Weekly),
            "1mo" => Ok(Self::Monthly),
            other => Err(DataError::InvalidParameter(format!(
                "unknown history interval: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_round_trip() {
        for freq in [StatementFrequency::Annual, StatementFrequency::Quarterly] {
            assert_eq!(freq.as_str().parse::<StatementFrequency>().unwrap(), freq);
        }
    }

    #[test]
    fn test_range_parses_wire_strings() {
        assert_eq!("1y".parse::<HistoryRange>().unwrap(), HistoryRange::OneYear);
        assert_eq!(
            "10y".parse::<HistoryRange>().unwrap(),
            HistoryRange::TenYears
        );
        assert!("3mo".parse::<HistoryRange>().is_err());
    }

    #[test]
    fn test_interval_parses_wire_strings() {
        assert_eq!(
            "1wk".parse::<HistoryInterval>().unwrap(),
            HistoryInterval::Weekly
        );
        assert!("1h".parse::<HistoryInterval>().is_err());
    }
}
