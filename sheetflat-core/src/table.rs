//! In-memory table structures passed between pipeline stages

use std::fmt;

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing cell. Rendered as an empty field, never as zero.
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Empty cells and whitespace-only text both count as blank
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            // f64 Display never switches to exponent notation and drops ".0"
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Two-level label of a column: upper group label and lower sub-label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub category: String,
    pub sub_label: String,
}

impl ColumnHeader {
    pub fn new(category: impl Into<String>, sub_label: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            sub_label: sub_label.into(),
        }
    }

    /// Sub-label, or the group label when the sub-label cell was blank
    /// (a label merged across both header rows)
    pub fn effective_label(&self) -> &str {
        if self.sub_label.trim().is_empty() {
            &self.category
        } else {
            &self.sub_label
        }
    }
}

impl fmt::Display for ColumnHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.category, self.sub_label)
    }
}

/// Table parsed from a worksheet, with a two-level column header.
///
/// Every row holds exactly `columns.len()` cells. Filtering produces another
/// `RawTable` with the same columns and a subset of the rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Name of the worksheet the table came from
    pub sheet: String,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One output column: its flat name and the source column it copies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpecEntry {
    pub name: String,
    pub source_index: usize,
}

impl ColumnSpecEntry {
    pub fn new(name: impl Into<String>, source_index: usize) -> Self {
        Self {
            name: name.into(),
            source_index,
        }
    }
}

/// Ordered projection from a `RawTable` to the flat output columns
pub type ColumnSpec = Vec<ColumnSpecEntry>;

/// Filtered rows projected through a `ColumnSpec`, ready to serialize
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl OutputTable {
    /// Copy the selected columns of every row, unchanged, in `ColumnSpec` order
    pub fn project(table: &RawTable, spec: &[ColumnSpecEntry]) -> Self {
        let headers = spec.iter().map(|entry| entry.name.clone()).collect();
        let rows = table
            .rows
            .iter()
            .map(|row| {
                spec.iter()
                    .map(|entry| row.get(entry.source_index).cloned().unwrap_or(CellValue::Empty))
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}
