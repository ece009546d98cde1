//! Error type shared by every pipeline stage

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Terminal failures of a pipeline run. None of them is retried internally.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot open archive {}: {source}", path.display())]
    ArchiveUnreadable {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error(
        "member '{member}' is not present in archive {} (available: {})",
        path.display(),
        available.join(", ")
    )]
    MissingMember {
        path: PathBuf,
        member: String,
        available: Vec<String>,
    },

    #[error("cannot read worksheet data from '{member}': {reason}")]
    WorkbookUnreadable { member: String, reason: String },

    #[error("worksheet '{sheet}' does not match the expected layout: {reason}")]
    SchemaMismatch { sheet: String, reason: String },

    #[error("header has {columns} column(s), at least 2 are required")]
    EmptyHeader { columns: usize },

    #[error("cannot write output {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Short stable name of the error kind, logged by the CLI on failure
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::ArchiveUnreadable { .. } => "ArchiveUnreadable",
            ExtractError::MissingMember { .. } => "MissingMember",
            ExtractError::WorkbookUnreadable { .. } => "WorkbookUnreadable",
            ExtractError::SchemaMismatch { .. } => "SchemaMismatch",
            ExtractError::EmptyHeader { .. } => "EmptyHeader",
            ExtractError::WriteFailure { .. } => "WriteFailure",
            ExtractError::Config(_) => "Config",
        }
    }
}
