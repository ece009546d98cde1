//! Header normalizer: two-level header to flat output column names

use crate::config::PipelineConfig;
use crate::error::{ExtractError, Result};
use crate::table::{ColumnHeader, ColumnSpec, ColumnSpecEntry};
use log::{debug, info};

/// Naming and pruning rules applied to the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRules {
    /// Output name of the first (category) column
    pub category_label: String,
    /// Prepended to the label of every kept value column
    pub column_prefix: String,
    /// Columns whose label contains this substring are dropped (case-sensitive)
    pub aggregate_marker: String,
}

impl HeaderRules {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            category_label: config.category_label.clone(),
            column_prefix: config.column_prefix.clone(),
            aggregate_marker: config.aggregate_marker.clone(),
        }
    }

    fn is_aggregate(&self, column: &ColumnHeader) -> bool {
        column.effective_label().contains(&self.aggregate_marker)
    }
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

/// Derive the output columns.
///
/// Column 0 is always kept under `category_label`. Every other column is
/// dropped when its sub-label contains the aggregate marker, otherwise kept as
/// `column_prefix + sub-label`. Surviving columns keep their left-to-right
/// order; names are not deduplicated.
pub fn normalize_header(columns: &[ColumnHeader], rules: &HeaderRules) -> Result<ColumnSpec> {
    if columns.len() < 2 {
        return Err(ExtractError::EmptyHeader {
            columns: columns.len(),
        });
    }

    let mut spec = vec![ColumnSpecEntry::new(rules.category_label.clone(), 0)];
    let mut dropped = 0;

    for (index, column) in columns.iter().enumerate().skip(1) {
        if rules.is_aggregate(column) {
            debug!("Dropping aggregate column {} {}", index, column);
            dropped += 1;
            continue;
        }
        spec.push(ColumnSpecEntry::new(
            format!("{}{}", rules.column_prefix, column.effective_label()),
            index,
        ));
    }

    info!(
        "Header normalized: {} output columns, {} aggregate columns dropped",
        spec.len(),
        dropped
    );
    Ok(spec)
}
