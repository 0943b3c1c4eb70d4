//! Tabular statement model.
//!
//! A [`StatementTable`] mirrors the provider's layout: rows are vendor
//! account labels (not a standardized vocabulary), columns are reporting
//! periods in provider order (most recent first by convention), and cells
//! are numeric or missing. A missing cell is always `None`, never `0.0` —
//! zero would corrupt downstream ratio arithmetic.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};

/// One account row in a statement table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Vendor account label, e.g. "Net Income" or "Total Current Assets".
    pub label: String,
    /// One value per table period; `None` marks a missing cell.
    pub values: Vec<Option<f64>>,
}

impl StatementRow {
    /// Create a new statement row.
    #[must_use]
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// A financial statement as a label-by-period table.
///
/// Period labels are plain strings: date-like provider columns are formatted
/// as calendar dates at construction time, anything else is carried verbatim.
/// Labels are positional, not keys — duplicate labels are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementTable {
    periods: Vec<String>,
    rows: Vec<StatementRow>,
}

impl StatementTable {
    /// Build a table from period labels and rows.
    ///
    /// Every row must carry exactly one value per period; a row that does
    /// not line up is a shape error, the only condition under which
    /// downstream ratio computation is refused.
    pub fn new(periods: Vec<String>, rows: Vec<StatementRow>) -> Result<Self> {
        for row in &rows {
            if row.values.len() != periods.len() {
                return Err(DataError::ShapeMismatch {
                    label: row.label.clone(),
                    expected: periods.len(),
                    got: row.values.len(),
                });
            }
        }
        Ok(Self { periods, rows })
    }

    /// A table with no periods and no rows, used when the provider returned
    /// nothing for a statement.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            periods: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// True when the table has no periods or no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() || self.rows.is_empty()
    }

    /// Period labels in provider column order.
    #[must_use]
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    /// Account rows in provider order.
    #[must_use]
    pub fn rows(&self) -> &[StatementRow] {
        &self.rows
    }

    /// Number of reporting periods.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Number of account rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> StatementTable {
        StatementTable::new(
            vec!["2024-12-31".to_string(), "2023-12-31".to_string()],
            vec![
                StatementRow::new("Net Income", vec![Some(100.0), Some(80.0)]),
                StatementRow::new("Total Revenue", vec![Some(900.0), None]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_table_shape() {
        let t = table();
        assert_eq!(t.period_count(), 2);
        assert_eq!(t.row_count(), 2);
        assert!(!t.is_empty());
        assert_eq!(t.rows()[1].values[1], None);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let result = StatementTable::new(
            vec!["2024-12-31".to_string()],
            vec![StatementRow::new("Net Income", vec![Some(1.0), Some(2.0)])],
        );
        assert!(matches!(
            result,
            Err(DataError::ShapeMismatch {
                expected: 1,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_table() {
        let t = StatementTable::empty();
        assert!(t.is_empty());
        assert_eq!(t.period_count(), 0);

        // A table with periods but no rows is still empty for callers.
        let t = StatementTable::new(vec!["2024".to_string()], vec![]).unwrap();
        assert!(t.is_empty());
    }

    #[test]
    fn test_duplicate_period_labels_are_tolerated() {
        let t = StatementTable::new(
            vec!["2024".to_string(), "2024".to_string()],
            vec![StatementRow::new("Inventory", vec![Some(1.0), Some(2.0)])],
        );
        assert!(t.is_ok());
    }
}
