//! Output formatters for duplicate reports.
//!
//! This module provides different output formats for a [`Report`]:
//! - Text for people at a terminal (default)
//! - Rows: a JSON array of `[content, path...]` rows
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use dirdupes::duplicates::group;
//! use dirdupes::error::ExitCode;
//! use dirdupes::output::{render, OutputFormat, RenderContext};
//! use dirdupes::scanner::scan;
//! use std::path::Path;
//!
//! let report = group(&scan(Path::new("root")).unwrap());
//! let summary = report.summary();
//! let ctx = RenderContext::new(&summary, &[], ExitCode::from_scan(&summary, 0));
//!
//! render(&report, OutputFormat::Rows, &ctx, std::io::stdout()).unwrap();
//! ```

pub mod csv;
pub mod json;
pub mod text;

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duplicates::{Report, ReportSummary};
use crate::error::ExitCode;
use crate::scanner::ScanError;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::{JsonOutput, RowsOutput};
pub use self::text::TextOutput;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable listing with a summary
    #[default]
    Text,
    /// JSON array of `[content, path...]` rows
    Rows,
    /// JSON object with groups and summary
    Json,
    /// CSV with one record per path
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Rows => write!(f, "rows"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
}

/// Scan-level information shown alongside the report.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Summary of the full (unfiltered) report
    pub summary: &'a ReportSummary,
    /// Entries skipped during the scan
    pub skipped: &'a [ScanError],
    /// Exit code this run will finish with
    pub exit_code: ExitCode,
    /// Use terminal colors in text output
    pub color: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a context with colors disabled.
    #[must_use]
    pub fn new(summary: &'a ReportSummary, skipped: &'a [ScanError], exit_code: ExitCode) -> Self {
        Self {
            summary,
            skipped,
            exit_code,
            color: false,
        }
    }

    /// Enable or disable colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Write `report` to `writer` in the given format.
///
/// # Errors
///
/// Returns [`OutputError`] if serialization or writing fails.
pub fn render<W: Write>(
    report: &Report,
    format: OutputFormat,
    ctx: &RenderContext<'_>,
    mut writer: W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Text => TextOutput::new(report, ctx).write_to(&mut writer)?,
        OutputFormat::Rows => {
            RowsOutput::new(report).write_to(&mut writer)?;
            writeln!(writer)?;
        }
        OutputFormat::Json => {
            JsonOutput::new(report, ctx).write_to(&mut writer)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => CsvOutput::new(report).write_to(&mut writer)?,
    }
    writer.flush()?;
    Ok(())
}
