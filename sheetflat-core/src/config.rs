//! Run configuration for the extraction pipeline

use crate::error::{ExtractError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Number of stacked header rows the parser understands
pub const HEADER_DEPTH: usize = 2;

/// Which worksheet of the extracted workbook to read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SelectorRepr", into = "SelectorRepr")]
pub enum WorksheetSelector {
    /// First worksheet in workbook order
    #[default]
    First,
    /// 0-based position in workbook order
    Index(usize),
    Name(String),
}

impl fmt::Display for WorksheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorksheetSelector::First => write!(f, "first"),
            WorksheetSelector::Index(i) => write!(f, "#{}", i),
            WorksheetSelector::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for WorksheetSelector {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("first") {
            WorksheetSelector::First
        } else if let Ok(index) = value.parse::<usize>() {
            WorksheetSelector::Index(index)
        } else {
            WorksheetSelector::Name(value.to_string())
        }
    }
}

// TOML form: an integer is an index, "first" is the default, any other string is a sheet name
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SelectorRepr {
    Index(usize),
    Name(String),
}

impl From<SelectorRepr> for WorksheetSelector {
    fn from(repr: SelectorRepr) -> Self {
        match repr {
            SelectorRepr::Index(i) => WorksheetSelector::Index(i),
            SelectorRepr::Name(name) if name.eq_ignore_ascii_case("first") => {
                WorksheetSelector::First
            }
            SelectorRepr::Name(name) => WorksheetSelector::Name(name),
        }
    }
}

impl From<WorksheetSelector> for SelectorRepr {
    fn from(selector: WorksheetSelector) -> Self {
        match selector {
            WorksheetSelector::First => SelectorRepr::Name("first".to_string()),
            WorksheetSelector::Index(i) => SelectorRepr::Index(i),
            WorksheetSelector::Name(name) => SelectorRepr::Name(name),
        }
    }
}

/// Main pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Source archive location
    pub archive_path: PathBuf,
    /// Spreadsheet member to extract from the archive
    pub member_name: String,
    pub worksheet: WorksheetSelector,
    /// Leading rows (titles, notes) before the header
    pub skip_rows: usize,
    pub header_depth: usize,
    /// Row filter key, compared against the first column
    pub target_category: String,
    /// Destination for the normalized CSV, overwritten on each run
    pub output_path: PathBuf,
    /// Substring (case-sensitive) identifying columns to drop
    pub aggregate_marker: String,
    /// Prefix for renamed value columns
    pub column_prefix: String,
    /// Output name of the first column
    pub category_label: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            archive_path: PathBuf::from("victims.zip"),
            member_name: "Victims_Age_by_Offense_Category_2022.xlsx".to_string(),
            worksheet: WorksheetSelector::First,
            skip_rows: 3,
            header_depth: HEADER_DEPTH,
            target_category: "Crimes Against Property".to_string(),
            output_path: PathBuf::from("Crimes_Against_Property_2022.csv"),
            aggregate_marker: "Total".to_string(),
            column_prefix: "Age: ".to_string(),
            category_label: "Offense Category".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file. Missing keys take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| ExtractError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PipelineConfig =
            toml::from_str(content).map_err(|e| ExtractError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.member_name.trim().is_empty() {
            return Err(ExtractError::Config("member_name must not be empty".into()));
        }
        if self.target_category.is_empty() {
            return Err(ExtractError::Config(
                "target_category must not be empty".into(),
            ));
        }
        // An empty marker is a substring of every label
        if self.aggregate_marker.is_empty() {
            return Err(ExtractError::Config(
                "aggregate_marker must not be empty".into(),
            ));
        }
        if self.header_depth != HEADER_DEPTH {
            return Err(ExtractError::Config(format!(
                "header_depth must be {} (got {})",
                HEADER_DEPTH, self.header_depth
            )));
        }
        Ok(())
    }
}
