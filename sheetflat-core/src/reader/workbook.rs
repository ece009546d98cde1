//! Workbook loading with calamine: spreadsheet bytes to a dense cell grid

use crate::config::WorksheetSelector;
use crate::error::{ExtractError, Result};
use crate::table::CellValue;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use log::info;
use std::io::Cursor;

/// A worksheet as a dense grid in absolute sheet coordinates.
///
/// Row 0 is the first row of the sheet even when the sheet's used range
/// starts further down, so row offsets (skip rows) stay meaningful.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Cell at absolute position, `Empty` outside the grid
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }
}

/// Open workbook bytes (format sniffed from content) and load one worksheet
pub fn load_sheet(bytes: Vec<u8>, member: &str, selector: &WorksheetSelector) -> Result<SheetGrid> {
    let unreadable = |reason: String| ExtractError::WorkbookUnreadable {
        member: member.to_string(),
        reason,
    };

    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| unreadable(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let name = select_sheet(&sheet_names, selector).ok_or_else(|| {
        unreadable(format!(
            "worksheet {} not found (sheets: {})",
            selector,
            sheet_names.join(", ")
        ))
    })?;

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| unreadable(format!("worksheet '{}': {}", name, e)))?;

    let grid = SheetGrid::new(name, dense_rows(&range));
    info!(
        "Loaded worksheet '{}' from '{}' ({} rows)",
        grid.name,
        member,
        grid.rows.len()
    );
    Ok(grid)
}

fn select_sheet(sheet_names: &[String], selector: &WorksheetSelector) -> Option<String> {
    match selector {
        WorksheetSelector::First => sheet_names.first().cloned(),
        WorksheetSelector::Index(i) => sheet_names.get(*i).cloned(),
        WorksheetSelector::Name(name) => sheet_names.iter().find(|s| *s == name).cloned(),
    }
}

fn dense_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((max_row, max_col)) = range.end() else {
        return Vec::new();
    };

    (0..=max_row)
        .map(|row| {
            (0..=max_col)
                .map(|col| {
                    range
                        .get_value((row, col))
                        .map(parse_cell_value)
                        .unwrap_or(CellValue::Empty)
                })
                .collect()
        })
        .collect()
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(if *b { "True" } else { "False" }.to_string()),
        // Error cells carry no usable value
        Data::Error(_) => CellValue::Empty,
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_sheet() {
        let names = vec!["Florida".to_string(), "Notes".to_string()];
        assert_eq!(
            select_sheet(&names, &WorksheetSelector::First),
            Some("Florida".to_string())
        );
        assert_eq!(
            select_sheet(&names, &WorksheetSelector::Index(1)),
            Some("Notes".to_string())
        );
        assert_eq!(select_sheet(&names, &WorksheetSelector::Index(2)), None);
        assert_eq!(
            select_sheet(&names, &WorksheetSelector::Name("Notes".to_string())),
            Some("Notes".to_string())
        );
        assert_eq!(
            select_sheet(&names, &WorksheetSelector::Name("notes".to_string())),
            None
        );
        assert_eq!(select_sheet(&[], &WorksheetSelector::First), None);
    }

    #[test]
    fn test_parse_cell_value() {
        assert_eq!(parse_cell_value(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(parse_cell_value(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(
            parse_cell_value(&Data::String("Fraud".to_string())),
            CellValue::Text("Fraud".to_string())
        );
        assert_eq!(
            parse_cell_value(&Data::Bool(true)),
            CellValue::Text("True".to_string())
        );
        assert_eq!(parse_cell_value(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_dense_rows_keep_absolute_positions() {
        let mut range: Range<Data> = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), Data::String("Title".to_string()));
        range.set_value((3, 2), Data::Int(5));

        let rows = dense_rows(&range);
        assert_eq!(rows.len(), 4);
        assert!(rows[0].iter().all(|c| c.is_empty()));
        assert_eq!(rows[2][1], CellValue::Text("Title".to_string()));
        assert_eq!(rows[3][2], CellValue::Number(5.0));
        assert_eq!(rows[3][0], CellValue::Empty);
    }

    #[test]
    fn test_garbage_bytes_are_unreadable() {
        let err = load_sheet(b"not a workbook".to_vec(), "x.xlsx", &WorksheetSelector::First)
            .unwrap_err();
        assert_eq!(err.kind(), "WorkbookUnreadable");
    }

    #[test]
    fn test_grid_cell_out_of_bounds() {
        let grid = SheetGrid::new("S", vec![vec![CellValue::Number(1.0)]]);
        assert_eq!(grid.cell(0, 0), &CellValue::Number(1.0));
        assert_eq!(grid.cell(0, 5), &CellValue::Empty);
        assert_eq!(grid.cell(9, 0), &CellValue::Empty);
    }
}
