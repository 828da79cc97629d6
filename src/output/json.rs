//! JSON output formatters for duplicate reports.
//!
//! Two shapes are provided.
//!
//! [`RowsOutput`] is the compact row form, one array per distinct content:
//!
//! ```json
//! [["xyz", "root/a.txt", "root/foo/c.txt"], ["123", "root/foo/d.txt"]]
//! ```
//!
//! [`JsonOutput`] is the detailed form for automation:
//!
//! ```json
//! {
//!   "groups": [
//!     {
//!       "content": "xyz",
//!       "size": 3,
//!       "count": 2,
//!       "paths": ["root/a.txt", "root/foo/c.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 3,
//!     "total_bytes": 9,
//!     "distinct_contents": 2,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_bytes": 3,
//!     "exit_code": 0,
//!     "exit_code_name": "DD000"
//!   },
//!   "skipped": []
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use super::RenderContext;
use crate::duplicates::{DuplicateGroup, Report, ReportSummary};
use crate::scanner::path_utils::display_path;
use crate::scanner::{ScanError, ScanErrorKind};

/// Report as a list of `[content, path...]` rows.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RowsOutput {
    /// One row per group
    pub rows: Vec<Vec<String>>,
}

impl RowsOutput {
    /// Create the row form of a report.
    #[must_use]
    pub fn new(report: &Report) -> Self {
        Self {
            rows: report.to_rows(),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Write compact JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer(writer, self)
    }
}

/// A single group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonGroup {
    /// Shared content as text (lossy for non-UTF-8 bytes)
    pub content: String,
    /// Content length in bytes
    pub size: u64,
    /// Number of paths
    pub count: usize,
    /// Paths holding the content
    pub paths: Vec<String>,
}

impl JsonGroup {
    /// Create a JSON group from a [`DuplicateGroup`].
    #[must_use]
    pub fn from_group(group: &DuplicateGroup) -> Self {
        Self {
            content: group.content_str().into_owned(),
            size: group.size(),
            count: group.len(),
            paths: group.paths.iter().map(|p| display_path(p)).collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Report summary fields
    #[serde(flatten)]
    pub report: ReportSummary,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DD000")
    pub exit_code_name: String,
}

/// A skipped entry in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSkipped {
    /// Path that could not be scanned
    pub path: String,
    /// Traversal or read failure
    pub kind: ScanErrorKind,
    /// Error message
    pub message: String,
}

impl JsonSkipped {
    /// Create a JSON entry from a skipped [`ScanError`].
    #[must_use]
    pub fn from_error(error: &ScanError) -> Self {
        Self {
            path: display_path(error.path()),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Groups in report order
    pub groups: Vec<JsonGroup>,
    /// Summary statistics
    pub summary: JsonSummary,
    /// Entries skipped during the scan
    pub skipped: Vec<JsonSkipped>,
}

impl JsonOutput {
    /// Create a new JSON output from a report and its render context.
    #[must_use]
    pub fn new(report: &Report, ctx: &RenderContext<'_>) -> Self {
        Self {
            groups: report.iter().map(JsonGroup::from_group).collect(),
            summary: JsonSummary {
                report: ctx.summary.clone(),
                exit_code: ctx.exit_code.as_i32(),
                exit_code_name: ctx.exit_code.code_prefix().to_string(),
            },
            skipped: ctx.skipped.iter().map(JsonSkipped::from_error).collect(),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, self)
    }
}
