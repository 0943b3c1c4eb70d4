//! Integration tests for the resolver-to-engine pipeline.

use hobart_data::{StatementRow, StatementTable};
use hobart_ratios::{Ratio, compute_ratios, unavailable_ratios};

fn table(period_labels: &[&str], rows: Vec<(&str, Vec<Option<f64>>)>) -> StatementTable {
    StatementTable::new(
        period_labels.iter().map(|l| (*l).to_string()).collect(),
        rows.into_iter()
            .map(|(label, values)| StatementRow::new(label, values))
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_vendor_relabeling_still_resolves() {
    // Labels as another provider version might spell them: no canonical
    // names anywhere, yet every ratio should still compute.
    let income = table(
        &["2024-12-31"],
        vec![("Net Income Applicable To Common Shares", vec![Some(120.0)])],
    );
    let balance = table(
        &["2024-12-31"],
        vec![
            ("TotalAssets", vec![Some(1200.0)]),
            ("Total Current Assets (Gross)", vec![Some(500.0)]),
            ("Current Liabilities", vec![Some(250.0)]),
            ("TotalStockholderEquity", vec![Some(600.0)]),
            ("Total Inventory", vec![Some(100.0)]),
        ],
    );

    let records = compute_ratios(&income, &balance);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].roa, Some(0.1));
    assert_eq!(records[0].roe, Some(0.2));
    assert_eq!(records[0].current_ratio, Some(2.0));
    assert_eq!(records[0].quick_ratio, Some(1.6));
    assert!(unavailable_ratios(&records).is_empty());
}

#[test]
fn test_misaligned_statement_columns() {
    // The balance sheet carries one extra, older period and lists its
    // columns in a different order than the income statement. Ratios must
    // align by period identity and follow the income statement's order.
    let income = table(
        &["2024-12-31", "2023-12-31"],
        vec![("Net Income", vec![Some(100.0), Some(80.0)])],
    );
    let balance = table(
        &["2022-12-31", "2023-12-31", "2024-12-31"],
        vec![("Total Assets", vec![Some(800.0), Some(900.0), Some(1000.0)])],
    );

    let records = compute_ratios(&income, &balance);
    let periods: Vec<&str> = records.iter().map(|r| r.period.as_str()).collect();
    assert_eq!(periods, ["2024-12-31", "2023-12-31"]);
    assert_eq!(records[0].roa, Some(0.1));
    assert_eq!(records[1].roa, Some(80.0 / 900.0));
}

#[test]
fn test_whole_statement_missing_is_diagnosed_once_per_ratio() {
    let income = table(
        &["2024", "2023", "2022"],
        vec![("Total Revenue", vec![Some(1.0), Some(2.0), Some(3.0)])],
    );

    let records = compute_ratios(&income, &StatementTable::empty());
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(hobart_ratios::RatioRecord::is_all_missing));

    // Four affected ratios, four diagnostics -- not twelve.
    assert_eq!(unavailable_ratios(&records).len(), 4);
    assert_eq!(unavailable_ratios(&records), Ratio::ALL.to_vec());
}
