//! Command-line interface definitions for dirdupes.
//!
//! This module defines all CLI arguments and subcommands using the clap
//! derive API. Global options (verbosity, color, config file) apply to every
//! subcommand.
//!
//! # Example
//!
//! ```bash
//! # Group the files under ./root by content (text listing)
//! dirdupes scan root
//!
//! # Emit [content, path...] rows as JSON
//! dirdupes scan root --output rows
//!
//! # Only show real duplicates, biggest groups first
//! dirdupes scan root --duplicates-only --order count
//!
//! # Write the demonstration tree to ./root
//! dirdupes fixture root
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::duplicates::GroupOrder;
use crate::output::OutputFormat;
use crate::scanner::ErrorPolicy;

/// Group files in a directory tree by identical content.
///
/// dirdupes reads every regular file below a root directory and reports
/// each distinct content together with every path that holds it.
#[derive(Debug, Parser)]
#[command(name = "dirdupes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Print errors as JSON objects on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Read settings from this TOML file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory and group its files by content
    Scan(ScanArgs),
    /// Write the demonstration tree to a directory
    Fixture(FixtureArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Root directory to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Group order [default: path]
    #[arg(long, value_enum)]
    pub order: Option<GroupOrder>,

    /// Only list contents held by two or more files
    #[arg(short, long)]
    pub duplicates_only: bool,

    /// What to do with unreadable entries below the root [default: abort]
    ///
    /// `abort` stops at the first error without producing a report.
    /// `skip` leaves the entry out and lists it after the report.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_error: Option<ErrorPolicy>,

    /// Read file contents in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for the fixture subcommand.
#[derive(Debug, Args)]
pub struct FixtureArgs {
    /// Directory to create the tree in
    #[arg(value_name = "PATH", default_value = "root")]
    pub path: PathBuf,
}
