//! Category filter: keep rows whose first column equals the target category

use crate::table::RawTable;
use log::{info, warn};

/// Column holding the category value. Selected by position, not by label text.
pub const CATEGORY_COLUMN: usize = 0;

/// Rows whose category cell is text exactly equal to `target` (case-sensitive,
/// no trimming), in original order. Columns are unchanged.
///
/// A target that matches nothing yields a zero-row table, not an error.
pub fn filter_by_category(table: &RawTable, target: &str) -> RawTable {
    let rows: Vec<_> = table
        .rows
        .iter()
        .filter(|row| {
            row.get(CATEGORY_COLUMN)
                .and_then(|cell| cell.as_text())
                .is_some_and(|value| value == target)
        })
        .cloned()
        .collect();

    if rows.is_empty() {
        warn!(
            "No rows of '{}' match category '{}' ({} rows scanned)",
            table.sheet,
            target,
            table.row_count()
        );
    } else {
        info!(
            "Kept {} of {} rows matching category '{}'",
            rows.len(),
            table.row_count(),
            target
        );
    }

    RawTable {
        sheet: table.sheet.clone(),
        columns: table.columns.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CellValue, ColumnHeader};

    fn table_with_categories(categories: &[&str]) -> RawTable {
        RawTable {
            sheet: "Sheet1".to_string(),
            columns: vec![
                ColumnHeader::new("Offense Category", ""),
                ColumnHeader::new("Age", "18-24"),
            ],
            rows: categories
                .iter()
                .enumerate()
                .map(|(i, c)| vec![CellValue::Text(c.to_string()), CellValue::Number(i as f64)])
                .collect(),
        }
    }

    #[test]
    fn test_filter_exactness() {
        let table = table_with_categories(&[
            "Crimes Against Property",
            "Crimes Against Persons",
            "Crimes Against Property",
        ]);

        let filtered = filter_by_category(&table, "Crimes Against Property");
        assert_eq!(filtered.row_count(), 2);
        assert_eq!(filtered.rows[0], table.rows[0]);
        assert_eq!(filtered.rows[1], table.rows[2]);
        assert_eq!(filtered.columns, table.columns);
    }

    #[test]
    fn test_filter_is_case_sensitive_and_untrimmed() {
        let table = table_with_categories(&[
            "crimes against property",
            "Crimes Against Property ",
            "Crimes Against Property",
        ]);

        let filtered = filter_by_category(&table, "Crimes Against Property");
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.rows[0][1], CellValue::Number(2.0));
    }

    #[test]
    fn test_zero_match_keeps_columns() {
        let table = table_with_categories(&["Crimes Against Persons"]);

        let filtered = filter_by_category(&table, "Crimes Against Society");
        assert!(filtered.is_empty());
        assert_eq!(filtered.column_count(), 2);
        assert_eq!(filtered.sheet, "Sheet1");
    }

    #[test]
    fn test_numeric_category_cells_never_match() {
        let mut table = table_with_categories(&[]);
        table.rows.push(vec![CellValue::Number(1.0), CellValue::Number(1.0)]);
        table.rows.push(vec![CellValue::Empty, CellValue::Number(2.0)]);

        assert!(filter_by_category(&table, "1").is_empty());
    }
}
