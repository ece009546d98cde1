//! sheetflat-core: extract a worksheet from an archive and flatten it to CSV
//!
//! The pipeline reads one spreadsheet member out of a zip archive, parses its
//! two-level header, keeps the rows of one category, collapses the header
//! into flat column names without aggregate columns, and writes the result as
//! comma-separated text.

pub mod archive;
pub mod config;
pub mod error;
pub mod filter;
pub mod header;
pub mod reader;
pub mod table;
pub mod writer;

use log::info;
use std::path::PathBuf;

pub use config::{PipelineConfig, WorksheetSelector};
pub use error::{ExtractError, Result};
pub use header::HeaderRules;
pub use table::{CellValue, ColumnHeader, ColumnSpec, ColumnSpecEntry, OutputTable, RawTable};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub sheet: String,
    pub rows_parsed: usize,
    pub rows_kept: usize,
    pub columns: Vec<String>,
    pub columns_dropped: usize,
    pub output_path: PathBuf,
}

impl RunSummary {
    /// True when no row matched the target category (header-only output)
    pub fn is_empty(&self) -> bool {
        self.rows_kept == 0
    }
}

/// Single-threaded extraction run over one configuration
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every stage in order and stop at the first error.
    ///
    /// The output file is only touched by the final stage, so any earlier
    /// failure leaves an existing output untouched.
    pub fn run(&self) -> Result<RunSummary> {
        let config = &self.config;
        config.validate()?;

        let bytes = archive::read_member(&config.archive_path, &config.member_name)?;
        let table = reader::read_table(
            bytes,
            &config.member_name,
            &config.worksheet,
            config.skip_rows,
        )?;
        let filtered = filter::filter_by_category(&table, &config.target_category);
        let spec = header::normalize_header(&table.columns, &HeaderRules::from_config(config))?;
        let output = writer::write_table(&config.output_path, &filtered, &spec)?;

        let summary = RunSummary {
            sheet: table.sheet,
            rows_parsed: table.rows.len(),
            rows_kept: output.row_count(),
            columns_dropped: table.columns.len() - spec.len(),
            columns: output.headers,
            output_path: config.output_path.clone(),
        };
        info!(
            "Run complete: {} of {} rows from '{}' written to {}",
            summary.rows_kept,
            summary.rows_parsed,
            summary.sheet,
            summary.output_path.display()
        );
        Ok(summary)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
