//! Table serializer: flat table to comma-separated text

use crate::error::{ExtractError, Result};
use crate::table::{ColumnSpecEntry, OutputTable, RawTable};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Project `table` through `spec` and write it to `path`, replacing any
/// existing file. Returns the table that was written.
pub fn write_table<P: AsRef<Path>>(
    path: P,
    table: &RawTable,
    spec: &[ColumnSpecEntry],
) -> Result<OutputTable> {
    let output = OutputTable::project(table, spec);
    write_output(path, &output)?;
    Ok(output)
}

/// Write an already projected table to `path`, header row first
pub fn write_output<P: AsRef<Path>>(path: P, output: &OutputTable) -> Result<()> {
    let path = path.as_ref();
    let write_failure = |source: csv::Error| ExtractError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| write_failure(csv::Error::from(e)))?;
    to_writer(file, output).map_err(write_failure)?;

    info!(
        "Wrote {} rows x {} columns to {}",
        output.row_count(),
        output.column_count(),
        path.display()
    );
    Ok(())
}

// Fields holding the delimiter, quotes or newlines are quoted
fn to_writer<W: Write>(sink: W, output: &OutputTable) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(&output.headers)?;
    for row in &output.rows {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
