use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use sheetflat_core::{Pipeline, PipelineConfig, RunSummary, WorksheetSelector, archive};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetflat")]
#[command(about = "Extract a worksheet from an archive and flatten it to CSV", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Source archive
    #[arg(long, value_name = "ZIP")]
    archive: Option<PathBuf>,

    /// Spreadsheet member to extract from the archive
    #[arg(long, value_name = "NAME")]
    member: Option<String>,

    /// Worksheet: "first", a 0-based index, or a sheet name
    #[arg(long, value_name = "SHEET")]
    sheet: Option<String>,

    /// Keep only rows whose first column equals this value
    #[arg(long, value_name = "CATEGORY")]
    category: Option<String>,

    /// Output CSV file (overwritten)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Leading rows to skip before the two header rows
    #[arg(long, value_name = "N")]
    skip_rows: Option<usize>,

    /// Drop columns whose label contains this text (case-sensitive)
    #[arg(long, value_name = "TEXT")]
    marker: Option<String>,

    /// Prefix for renamed value columns
    #[arg(long, value_name = "TEXT")]
    prefix: Option<String>,

    /// List the archive members and exit
    #[arg(long)]
    list_members: bool,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(archive) = &self.archive {
            config.archive_path = archive.clone();
        }
        if let Some(member) = &self.member {
            config.member_name = member.clone();
        }
        if let Some(sheet) = &self.sheet {
            config.worksheet = WorksheetSelector::from(sheet.as_str());
        }
        if let Some(category) = &self.category {
            config.target_category = category.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(skip_rows) = self.skip_rows {
            config.skip_rows = skip_rows;
        }
        if let Some(marker) = &self.marker {
            config.aggregate_marker = marker.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.column_prefix = prefix.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        PipelineConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("sheetflat.toml");
        if default_config_path.exists() {
            PipelineConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            PipelineConfig::default()
        }
    };
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    if cli.list_members {
        let members = archive::list_members(&config.archive_path).with_context(|| {
            format!("Failed to list archive {}", config.archive_path.display())
        })?;
        println!("{}", config.archive_path.display().to_string().bold());
        for member in members {
            let marker = if member == config.member_name { "*" } else { " " };
            println!("{} {}", marker.green().bold(), member);
        }
        return Ok(());
    }

    let archive_path = config.archive_path.clone();
    let summary = Pipeline::with_config(config)
        .run()
        .inspect_err(|e| log::error!("Run failed [{}]: {}", e.kind(), e))
        .with_context(|| format!("Failed to process archive {}", archive_path.display()))?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    if summary.is_empty() {
        println!(
            "{} no rows matched in worksheet '{}', wrote header only",
            "⚠".yellow().bold(),
            summary.sheet
        );
    } else {
        println!(
            "{} {} of {} rows from worksheet '{}'",
            "✓".green().bold(),
            summary.rows_kept,
            summary.rows_parsed,
            summary.sheet
        );
    }
    println!(
        "  {} {} ({} aggregate dropped)",
        "Columns:".bold(),
        summary.columns.len(),
        summary.columns_dropped
    );
    println!("  {} {}", "Output:".bold(), summary.output_path.display());
}
