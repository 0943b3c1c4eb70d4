//! Qualitative commentary and diagnostics derived from ratio records.
//!
//! Commentary looks only at the most recent reporting period and classifies
//! each present ratio into one of three bands using a threshold table. The
//! thresholds encode judgment calls, so they live in data
//! ([`default_thresholds`]) rather than inline conditionals and can be
//! tuned or tested independently of the sentence templates.

use chrono::NaiveDate;
use hobart_ratios::{Ratio, RatioRecord, unavailable_ratios};
use serde::{Deserialize, Serialize};

/// Qualitative band for a ratio value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    /// Comfortably above the upper threshold.
    Strong,
    /// Between the thresholds.
    Adequate,
    /// Below the lower threshold.
    Weak,
}

/// Banding thresholds for one ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    /// Ratio the thresholds apply to.
    pub ratio: Ratio,
    /// Values at or above (or strictly above, see `upper_inclusive`) this
    /// cutoff band as strong.
    pub upper: f64,
    /// Values strictly below this cutoff band as weak.
    pub lower: f64,
    /// Whether a value exactly at the upper cutoff counts as strong.
    pub upper_inclusive: bool,
}

impl ThresholdSpec {
    /// Classify a ratio value into a band.
    pub fn classify(&self, value: f64) -> Band {
        let above = if self.upper_inclusive {
            value >= self.upper
        } else {
            value > self.upper
        };
        if above {
            Band::Strong
        } else if value < self.lower {
            Band::Weak
        } else {
            Band::Adequate
        }
    }
}

/// Default banding thresholds.
///
/// ROA reads strong at or above 10% and weak under 5%; ROE at 15% and 8%.
/// The liquidity ratios band strictly around 1.0, so a ratio of exactly
/// one sits in the middle band.
pub const fn default_thresholds() -> [ThresholdSpec; 4] {
    [
        ThresholdSpec {
            ratio: Ratio::ReturnOnAssets,
            upper: 0.10,
            lower: 0.05,
            upper_inclusive: true,
        },
        ThresholdSpec {
            ratio: Ratio::ReturnOnEquity,
            upper: 0.15,
            lower: 0.08,
            upper_inclusive: true,
        },
        ThresholdSpec {
            ratio: Ratio::CurrentRatio,
            upper: 1.0,
            lower: 1.0,
            upper_inclusive: false,
        },
        ThresholdSpec {
            ratio: Ratio::QuickRatio,
            upper: 1.0,
            lower: 1.0,
            upper_inclusive: false,
        },
    ]
}

/// Commentary for the latest reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    /// Period the commentary describes.
    pub period: String,
    /// One sentence per present ratio; absent ratios are skipped.
    pub sentences: Vec<String>,
}

/// Select the most recent record.
///
/// Period labels are parsed as dates when every label is date-like;
/// otherwise ordering falls back to the lexicographically greatest label,
/// and ties resolve to the last record in table order.
pub fn latest_record(records: &[RatioRecord]) -> Option<&RatioRecord> {
    let parsed: Option<Vec<NaiveDate>> = records
        .iter()
        .map(|record| parse_period_date(&record.period))
        .collect();

    if let Some(dates) = parsed {
        let idx = dates
            .iter()
            .enumerate()
            .max_by_key(|(_, date)| **date)
            .map(|(idx, _)| idx)?;
        return records.get(idx);
    }

    records.iter().max_by(|a, b| a.period.cmp(&b.period))
}

/// Parse a period label as a calendar date.
///
/// Bare four-digit years map to the year end so annual labels still order
/// correctly against full dates.
fn parse_period_date(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    if let Ok(date) = NaiveDate::parse_from_str(label, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(label, "%m/%d/%Y") {
        return Some(date);
    }
    label
        .parse::<i32>()
        .ok()
        .filter(|year| (1000..=9999).contains(year))
        .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31))
}

/// Derive commentary from the latest record using the default thresholds.
pub fn generate_commentary(records: &[RatioRecord]) -> Option<Commentary> {
    generate_commentary_with(records, &default_thresholds())
}

/// Derive commentary from the latest record using custom thresholds.
pub fn generate_commentary_with(
    records: &[RatioRecord],
    thresholds: &[ThresholdSpec],
) -> Option<Commentary> {
    let latest = latest_record(records)?;

    let sentences = thresholds
        .iter()
        .filter_map(|spec| {
            latest
                .get(spec.ratio)
                .map(|value| sentence(spec.ratio, spec.classify(value), value))
        })
        .collect();

    Some(Commentary {
        period: latest.period.clone(),
        sentences,
    })
}

/// Fixed sentence template per ratio and band.
fn sentence(ratio: Ratio, band: Band, value: f64) -> String {
    match (ratio, band) {
        (Ratio::ReturnOnAssets, Band::Strong) => format!(
            "Return on assets of {:.1}% indicates the company is using its assets productively.",
            value * 100.0
        ),
        (Ratio::ReturnOnAssets, Band::Adequate) => format!(
            "Return on assets of {:.1}% is moderate for the latest period.",
            value * 100.0
        ),
        (Ratio::ReturnOnAssets, Band::Weak) => format!(
            "Return on assets of {:.1}% suggests weak asset productivity.",
            value * 100.0
        ),
        (Ratio::ReturnOnEquity, Band::Strong) => format!(
            "Return on equity of {:.1}% points to strong returns for shareholders.",
            value * 100.0
        ),
        (Ratio::ReturnOnEquity, Band::Adequate) => format!(
            "Return on equity of {:.1}% is in a moderate range.",
            value * 100.0
        ),
        (Ratio::ReturnOnEquity, Band::Weak) => format!(
            "Return on equity of {:.1}% is low relative to common benchmarks.",
            value * 100.0
        ),
        (Ratio::CurrentRatio, Band::Strong) => format!(
            "A current ratio of {value:.2} means short-term obligations are comfortably covered."
        ),
        (Ratio::CurrentRatio, Band::Adequate) => format!(
            "A current ratio of {value:.2} covers short-term obligations with no margin."
        ),
        (Ratio::CurrentRatio, Band::Weak) => format!(
            "A current ratio of {value:.2} signals pressure meeting short-term obligations."
        ),
        (Ratio::QuickRatio, Band::Strong) => format!(
            "A quick ratio of {value:.2} shows liquid assets alone cover current liabilities."
        ),
        (Ratio::QuickRatio, Band::Adequate) => format!(
            "A quick ratio of {value:.2} leaves no cushion once inventory is set aside."
        ),
        (Ratio::QuickRatio, Band::Weak) => format!(
            "A quick ratio of {value:.2} shows reliance on inventory to meet current liabilities."
        ),
    }
}

/// One informational message per ratio that never computed.
///
/// Emitted once per affected ratio across the whole window, naming the line
/// items worth checking, mirroring the dashboard's diagnostics panel.
pub fn missing_ratio_messages(records: &[RatioRecord]) -> Vec<String> {
    unavailable_ratios(records)
        .iter()
        .map(|ratio| {
            let inputs: Vec<&str> = ratio.inputs().iter().map(|item| item.name()).collect();
            format!(
                "{} could not be calculated — check if {} are present.",
                ratio.name(),
                inputs.join(" or ")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(period: &str, roa: Option<f64>) -> RatioRecord {
        RatioRecord {
            period: period.to_string(),
            roa,
            roe: None,
            current_ratio: None,
            quick_ratio: None,
        }
    }

    #[rstest]
    #[case(0.12, Band::Strong)]
    #[case(0.10, Band::Strong)] // inclusive upper cutoff
    #[case(0.07, Band::Adequate)]
    #[case(0.04, Band::Weak)]
    fn test_roa_bands(#[case] value: f64, #[case] expected: Band) {
        let spec = default_thresholds()[0];
        assert_eq!(spec.classify(value), expected);
    }

    #[rstest]
    #[case(1.5, Band::Strong)]
    #[case(1.0, Band::Adequate)] // exactly one is the middle band
    #[case(0.8, Band::Weak)]
    fn test_current_ratio_bands(#[case] value: f64, #[case] expected: Band) {
        let spec = default_thresholds()[2];
        assert_eq!(spec.classify(value), expected);
    }

    #[test]
    fn test_latest_record_by_date() {
        let records = vec![
            record("2023-12-31", Some(0.1)),
            record("2024-12-31", Some(0.2)),
            record("2022-12-31", Some(0.3)),
        ];
        assert_eq!(latest_record(&records).unwrap().period, "2024-12-31");
    }

    #[test]
    fn test_latest_record_bare_years() {
        let records = vec![record("2022", None), record("2024", None), record("2023", None)];
        assert_eq!(latest_record(&records).unwrap().period, "2024");
    }

    #[test]
    fn test_latest_record_lexicographic_fallback() {
        let records = vec![
            record("FY2023", Some(0.1)),
            record("FY2024", Some(0.2)),
            record("FY2022", Some(0.3)),
        ];
        assert_eq!(latest_record(&records).unwrap().period, "FY2024");
    }

    #[test]
    fn test_latest_record_positional_fallback() {
        // Identical unparseable labels: the last record in table order wins.
        let records = vec![record("n/a", Some(0.1)), record("n/a", Some(0.2))];
        assert_eq!(latest_record(&records).unwrap().roa, Some(0.2));
    }

    #[test]
    fn test_latest_record_empty() {
        assert!(latest_record(&[]).is_none());
    }

    #[test]
    fn test_commentary_skips_missing_ratios() {
        let records = vec![RatioRecord {
            period: "2024-12-31".to_string(),
            roa: Some(0.12),
            roe: None,
            current_ratio: Some(1.0),
            quick_ratio: None,
        }];
        let commentary = generate_commentary(&records).unwrap();
        assert_eq!(commentary.period, "2024-12-31");
        assert_eq!(commentary.sentences.len(), 2);
        assert!(commentary.sentences[0].contains("12.0%"));
        assert!(commentary.sentences[1].contains("no margin"));
    }

    #[test]
    fn test_commentary_empty_records() {
        assert!(generate_commentary(&[]).is_none());
    }

    #[test]
    fn test_missing_ratio_messages_fire_once_per_ratio() {
        let records = vec![record("2024", None), record("2023", None)];
        let messages = missing_ratio_messages(&records);
        assert_eq!(messages.len(), 4);
        assert_eq!(
            messages[0],
            "ROA could not be calculated — check if Net Income or Total Assets are present."
        );
        assert!(messages[1].starts_with("ROE could not be calculated"));
    }

    #[test]
    fn test_no_messages_when_a_ratio_is_present_somewhere() {
        let records = vec![record("2024", Some(0.1)), record("2023", None)];
        let messages = missing_ratio_messages(&records);
        // ROA computed in one period, so only the other three report.
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| !m.starts_with("ROA")));
    }
}
