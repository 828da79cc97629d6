//! Structured error handling and exit codes.

use serde::Serialize;

use crate::duplicates::ReportSummary;
use crate::scanner::{ScanError, ScanErrorKind};

/// Exit codes for the dirdupes application.
///
/// - 0: Success (completed normally, duplicates found)
/// - 1: General error (scan failure or unexpected error)
/// - 2: No duplicates found (completed normally, every content unique)
/// - 3: Partial success (completed, but some entries were skipped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and duplicates were found.
    Success = 0,
    /// General error: The scan failed or an unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: Scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Partial success: Scan completed but skipped unreadable entries.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Derive the exit code for a completed scan.
    ///
    /// Skipped entries take precedence, since the report may under-count
    /// duplicates.
    #[must_use]
    pub fn from_scan(summary: &ReportSummary, skipped: usize) -> Self {
        if skipped > 0 {
            Self::PartialSuccess
        } else if summary.duplicate_groups > 0 {
            Self::Success
        } else {
            Self::NoDuplicates
        }
    }

    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DD000",
            Self::GeneralError => "DD001",
            Self::NoDuplicates => "DD002",
            Self::PartialSuccess => "DD003",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Scan failure class, if the error came from the scanner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ScanErrorKind>,
    /// Path the scan failure refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        let scan_error = err.chain().find_map(|e| e.downcast_ref::<ScanError>());
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            kind: scan_error.map(ScanError::kind),
            path: scan_error.map(|e| crate::scanner::path_utils::display_path(e.path())),
        }
    }
}
