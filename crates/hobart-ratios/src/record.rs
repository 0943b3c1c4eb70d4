//! Per-period ratio records.

use crate::registry::Ratio;
use serde::{Deserialize, Serialize};

/// One reporting period's computed ratios.
///
/// Records are created fresh per query and never mutated. A ratio the
/// engine could not compute is `None` — distinct from zero, and serialized
/// as an empty CSV field. Serde names match the export header columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRecord {
    /// Reporting period label, matching the reference table's column.
    #[serde(rename = "Period")]
    pub period: String,

    /// Return on assets.
    #[serde(rename = "ROA")]
    pub roa: Option<f64>,

    /// Return on equity.
    #[serde(rename = "ROE")]
    pub roe: Option<f64>,

    /// Current ratio.
    #[serde(rename = "Current Ratio")]
    pub current_ratio: Option<f64>,

    /// Quick ratio.
    #[serde(rename = "Quick Ratio")]
    pub quick_ratio: Option<f64>,
}

impl RatioRecord {
    /// Value of one ratio in this record.
    #[must_use]
    pub const fn get(&self, ratio: Ratio) -> Option<f64> {
        match ratio {
            Ratio::ReturnOnAssets => self.roa,
            Ratio::ReturnOnEquity => self.roe,
            Ratio::CurrentRatio => self.current_ratio,
            Ratio::QuickRatio => self.quick_ratio,
        }
    }

    /// True when every ratio in the record is missing.
    #[must_use]
    pub const fn is_all_missing(&self) -> bool {
        self.roa.is_none()
            && self.roe.is_none()
            && self.current_ratio.is_none()
            && self.quick_ratio.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_ratio() {
        let record = RatioRecord {
            period: "2024-12-31".to_string(),
            roa: Some(0.1),
            roe: None,
            current_ratio: Some(2.0),
            quick_ratio: None,
        };
        assert_eq!(record.get(Ratio::ReturnOnAssets), Some(0.1));
        assert_eq!(record.get(Ratio::ReturnOnEquity), None);
        assert!(!record.is_all_missing());
    }
}
