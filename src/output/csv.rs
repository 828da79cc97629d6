//! CSV output formatter for duplicate reports.
//!
//! One record is generated for each scanned path.
//!
//! # Columns
//!
//! - `group_id`: 1-based position of the group in the report
//! - `content`: Shared content as text
//! - `size`: Content length in bytes
//! - `path`: Path holding the content

use std::io;

use serde::Serialize;

use super::OutputError;
use crate::duplicates::Report;
use crate::scanner::path_utils::display_path;

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    group_id: usize,
    content: &'a str,
    size: u64,
    path: String,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    report: &'a Report,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), OutputError> {
        let mut csv_writer = ::csv::Writer::from_writer(writer);

        for (idx, group) in self.report.iter().enumerate() {
            let content = group.content_str();
            for path in &group.paths {
                csv_writer.serialize(CsvRow {
                    group_id: idx + 1,
                    content: &content,
                    size: group.size(),
                    path: display_path(path),
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if serialization fails.
    pub fn to_string(&self) -> Result<String, OutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
