//! Tabular parser: worksheet bytes to a table with a two-level header

use crate::config::{HEADER_DEPTH, WorksheetSelector};
use crate::error::{ExtractError, Result};
use crate::table::{CellValue, ColumnHeader, RawTable};
use log::info;

pub mod workbook;

pub use workbook::{SheetGrid, load_sheet};

/// Minimum columns downstream stages need: one category column plus one value column
pub const MIN_COLUMNS: usize = 2;

/// Read the selected worksheet from workbook bytes and parse it into a `RawTable`
pub fn read_table(
    bytes: Vec<u8>,
    member: &str,
    selector: &WorksheetSelector,
    skip_rows: usize,
) -> Result<RawTable> {
    let grid = load_sheet(bytes, member, selector)?;
    parse_grid(&grid, skip_rows)
}

/// Parse a cell grid laid out as: `skip_rows` ignored rows, two header rows,
/// then data rows up to the first fully blank row or the end of the sheet.
///
/// Blank cells in the upper header row take the nearest non-blank label to
/// their left (merged group headers). The lower row is used as-is.
pub fn parse_grid(grid: &SheetGrid, skip_rows: usize) -> Result<RawTable> {
    let mismatch = |reason: String| ExtractError::SchemaMismatch {
        sheet: grid.name.clone(),
        reason,
    };

    let header_start = skip_rows;
    let data_start = header_start
        .checked_add(HEADER_DEPTH)
        .filter(|end| *end <= grid.rows.len());
    let Some(data_start) = data_start else {
        return Err(mismatch(format!(
            "expected {} header rows after skipping {} rows, sheet has {} rows",
            HEADER_DEPTH,
            skip_rows,
            grid.rows.len()
        )));
    };

    let width = header_width(grid, header_start);
    if width < MIN_COLUMNS {
        return Err(mismatch(format!(
            "header has {} column(s), at least {} are required",
            width, MIN_COLUMNS
        )));
    }

    let upper: Vec<String> = (0..width)
        .map(|col| header_label(grid.cell(header_start, col)))
        .collect();
    let lower: Vec<String> = (0..width)
        .map(|col| header_label(grid.cell(header_start + 1, col)))
        .collect();

    let columns = carry_forward(&upper)
        .into_iter()
        .zip(lower)
        .map(|(category, sub_label)| ColumnHeader::new(category, sub_label))
        .collect();

    let rows: Vec<Vec<CellValue>> = (data_start..grid.rows.len())
        .map(|row| {
            (0..width)
                .map(|col| grid.cell(row, col).clone())
                .collect::<Vec<_>>()
        })
        .take_while(|cells| !cells.iter().all(CellValue::is_blank))
        .collect();

    info!(
        "Parsed worksheet '{}': {} columns, {} data rows",
        grid.name,
        width,
        rows.len()
    );

    Ok(RawTable {
        sheet: grid.name.clone(),
        columns,
        rows,
    })
}

/// Fill blank labels with the nearest non-blank label to their left.
/// Leading blanks stay blank.
pub fn carry_forward(labels: &[String]) -> Vec<String> {
    let mut current = String::new();
    labels
        .iter()
        .map(|label| {
            if !label.is_empty() {
                current = label.clone();
            }
            current.clone()
        })
        .collect()
}

// Number of columns spanned by the header: up to the last non-blank label in either row
fn header_width(grid: &SheetGrid, header_start: usize) -> usize {
    (header_start..header_start + HEADER_DEPTH)
        .filter_map(|row| grid.rows.get(row))
        .filter_map(|cells| cells.iter().rposition(|c| !c.is_blank()))
        .map(|last| last + 1)
        .max()
        .unwrap_or(0)
}

fn header_label(cell: &CellValue) -> String {
    cell.to_string().trim().to_string()
}
