//! Line-item resolution against vendor statement tables.
//!
//! Row labels are not a standardized vocabulary: the same account appears
//! as "Total Stockholder Equity", "Total Equity" or "TotalStockholderEquity"
//! depending on company, region and provider version. A line item is
//! therefore located by trying an ordered list of known label variants with
//! a permissive three-way match: a row matches a candidate when the two
//! labels are equal case-insensitively, or either contains the other.
//! The permissiveness survives vendor relabeling at the cost of the
//! occasional false positive; candidate lists are ordered most specific
//! first to keep that surface small.

use hobart_data::{StatementRow, StatementTable};
use tracing::debug;

/// Locate the first row matching any candidate label.
///
/// Candidates are tried in priority order; the first candidate that matches
/// any row wins, and ties within one candidate go to the earliest row in
/// table order.
#[must_use]
pub fn find_row<'t>(table: &'t StatementTable, candidates: &[&str]) -> Option<&'t StatementRow> {
    if table.is_empty() {
        return None;
    }

    for candidate in candidates {
        let candidate = candidate.to_lowercase();
        for row in table.rows() {
            let label = row.label.to_lowercase();
            if label == candidate || label.contains(&candidate) || candidate.contains(&label) {
                return Some(row);
            }
        }
    }

    None
}

/// Resolve a line item as a numeric series aligned to `reference_periods`.
///
/// An empty table or an unmatched item yields an all-missing series of the
/// reference length. A matched row whose own table columns differ from the
/// reference is re-aligned by period-label identity (labels absent from the
/// row's table become missing); when the two tables share no labels at all
/// the values degrade to positional assignment, truncated or padded to the
/// reference length. Neither path can fail.
#[must_use]
pub fn resolve(
    table: &StatementTable,
    candidates: &[&str],
    reference_periods: &[String],
) -> Vec<Option<f64>> {
    let Some(row) = find_row(table, candidates) else {
        return vec![None; reference_periods.len()];
    };

    align(row, table.periods(), reference_periods)
}

fn align(
    row: &StatementRow,
    own_periods: &[String],
    reference_periods: &[String],
) -> Vec<Option<f64>> {
    let shares_labels = own_periods
        .iter()
        .any(|period| reference_periods.contains(period));

    if shares_labels {
        reference_periods
            .iter()
            .map(|period| {
                own_periods
                    .iter()
                    .position(|own| own == period)
                    .and_then(|idx| row.values.get(idx).copied().flatten())
            })
            .collect()
    } else {
        debug!(
            label = %row.label,
            "no shared period labels, falling back to positional alignment"
        );
        (0..reference_periods.len())
            .map(|idx| row.values.get(idx).copied().flatten())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn periods(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| (*l).to_string()).collect()
    }

    fn table(period_labels: &[&str], rows: Vec<(&str, Vec<Option<f64>>)>) -> StatementTable {
        StatementTable::new(
            periods(period_labels),
            rows.into_iter()
                .map(|(label, values)| StatementRow::new(label, values))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_candidate_priority_beats_table_order() {
        let t = table(
            &["2024"],
            vec![
                ("Total Equity", vec![Some(1.0)]),
                ("Total Stockholder Equity", vec![Some(2.0)]),
            ],
        );
        let row = find_row(&t, &["Total Stockholder Equity", "Total Equity"]).unwrap();
        assert_eq!(row.label, "Total Stockholder Equity");
    }

    #[test]
    fn test_first_row_wins_within_one_candidate() {
        let t = table(
            &["2024"],
            vec![
                ("Inventory", vec![Some(1.0)]),
                ("Total Inventory", vec![Some(2.0)]),
            ],
        );
        let row = find_row(&t, &["Inventory"]).unwrap();
        assert_eq!(row.label, "Inventory");
    }

    #[rstest]
    #[case("Total Current Assets (Gross)", "Current Assets")] // candidate inside row label
    #[case("Net Income", "Net Income Applicable To Common Stockholders")] // row label inside candidate
    #[case("NET INCOME", "Net Income")] // case-insensitive equality
    fn test_three_way_match(#[case] row_label: &str, #[case] candidate: &str) {
        let t = table(&["2024"], vec![(row_label, vec![Some(1.0)])]);
        assert!(find_row(&t, &[candidate]).is_some());
    }

    #[test]
    fn test_no_match_and_empty_table() {
        let t = table(&["2024"], vec![("Goodwill", vec![Some(1.0)])]);
        assert!(find_row(&t, &["Net Income"]).is_none());
        assert!(find_row(&StatementTable::empty(), &["Net Income"]).is_none());
    }

    #[test]
    fn test_resolve_unmatched_is_all_missing() {
        let t = table(&["2024", "2023"], vec![("Goodwill", vec![Some(1.0), None])]);
        let series = resolve(&t, &["Net Income"], &periods(&["2024", "2023", "2022"]));
        assert_eq!(series, vec![None, None, None]);
    }

    #[test]
    fn test_resolve_identity_alignment_reorders() {
        let t = table(
            &["2023", "2024"],
            vec![("Total Assets", vec![Some(900.0), Some(1000.0)])],
        );
        let series = resolve(&t, &["Total Assets"], &periods(&["2024", "2023"]));
        assert_eq!(series, vec![Some(1000.0), Some(900.0)]);
    }

    #[test]
    fn test_resolve_identity_alignment_partial_overlap() {
        let t = table(
            &["2024", "2022"],
            vec![("Total Assets", vec![Some(1000.0), Some(800.0)])],
        );
        let series = resolve(&t, &["Total Assets"], &periods(&["2024", "2023"]));
        assert_eq!(series, vec![Some(1000.0), None]);
    }

    #[test]
    fn test_resolve_positional_fallback() {
        // Disjoint labels: values assigned by position, padded with missing.
        let t = table(
            &["FY24", "FY23"],
            vec![("Total Assets", vec![Some(1000.0), Some(900.0)])],
        );
        let series = resolve(&t, &["Total Assets"], &periods(&["2024", "2023", "2022"]));
        assert_eq!(series, vec![Some(1000.0), Some(900.0), None]);
    }

    #[test]
    fn test_resolve_positional_fallback_truncates() {
        let t = table(
            &["FY24", "FY23"],
            vec![("Total Assets", vec![Some(1000.0), Some(900.0)])],
        );
        let series = resolve(&t, &["Total Assets"], &periods(&["2024"]));
        assert_eq!(series, vec![Some(1000.0)]);
    }
}
