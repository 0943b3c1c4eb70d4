//! Ratio computation over resolved line items.

use crate::record::RatioRecord;
use crate::registry::{LineItem, Ratio};
use crate::resolver;
use hobart_data::StatementTable;

/// Compute per-period ratios from an income statement and a balance sheet.
///
/// The income statement supplies the reference period columns, falling back
/// to the balance sheet when it is empty; when both are empty the result is
/// empty — "ratios unavailable" is a normal outcome, not a fault. Output
/// order matches the reference table's column order verbatim (the
/// provider's convention, typically most recent first); nothing is
/// re-sorted here.
///
/// Missing operands propagate: a period where either side of a division is
/// missing yields a missing ratio, and a zero denominator normalizes to
/// missing rather than infinity. Malformed tables cannot reach this
/// function — shape is validated when a [`StatementTable`] is built.
#[must_use]
pub fn compute_ratios(income: &StatementTable, balance: &StatementTable) -> Vec<RatioRecord> {
    let reference = if !income.is_empty() {
        income
    } else if !balance.is_empty() {
        balance
    } else {
        return Vec::new();
    };
    let periods = reference.periods();

    let resolve = |table: &StatementTable, item: LineItem| {
        resolver::resolve(table, item.candidate_labels(), periods)
    };

    let net_income = resolve(income, LineItem::NetIncome);
    let total_assets = resolve(balance, LineItem::TotalAssets);
    let total_equity = resolve(balance, LineItem::TotalEquity);
    let current_assets = resolve(balance, LineItem::CurrentAssets);
    let current_liabilities = resolve(balance, LineItem::CurrentLiabilities);
    let inventory = resolve(balance, LineItem::Inventory);

    periods
        .iter()
        .enumerate()
        .map(|(i, period)| RatioRecord {
            period: period.clone(),
            roa: ratio_of(net_income[i], total_assets[i]),
            roe: ratio_of(net_income[i], total_equity[i]),
            current_ratio: ratio_of(current_assets[i], current_liabilities[i]),
            quick_ratio: ratio_of(sub(current_assets[i], inventory[i]), current_liabilities[i]),
        })
        .collect()
}

/// Divide with missing-operand propagation; non-finite quotients (zero
/// denominators, 0/0) normalize to missing.
fn ratio_of(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) => {
            let quotient = n / d;
            quotient.is_finite().then_some(quotient)
        }
        _ => None,
    }
}

fn sub(minuend: Option<f64>, subtrahend: Option<f64>) -> Option<f64> {
    match (minuend, subtrahend) {
        (Some(a), Some(b)) => Some(a - b),
        _ => None,
    }
}

/// Ratios that are missing for every period, in fixed ratio order.
///
/// Feeds the one-diagnostic-per-ratio rule: a ratio absent across the whole
/// window is reported once, not once per period. An empty record set
/// reports nothing — there is no window to diagnose.
#[must_use]
pub fn unavailable_ratios(records: &[RatioRecord]) -> Vec<Ratio> {
    if records.is_empty() {
        return Vec::new();
    }

    Ratio::ALL
        .iter()
        .copied()
        .filter(|ratio| records.iter().all(|record| record.get(*ratio).is_none()))
        .collect()
}
