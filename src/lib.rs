//! dirdupes - group files by identical content
//!
//! Walks a directory tree, reads every regular file and groups the paths
//! whose contents are byte-for-byte identical.
//!
//! The pipeline has two stages:
//!
//! 1. [`scanner::scan`] builds a [`scanner::ScanResult`] mapping each path
//!    to its content, failing fast on the first traversal or read error.
//! 2. [`duplicates::group`] partitions those paths into a
//!    [`duplicates::Report`], one group per distinct content.
//!
//! # Example
//!
//! ```no_run
//! use dirdupes::duplicates::group;
//! use dirdupes::scanner::scan;
//! use std::path::Path;
//!
//! let report = group(&scan(Path::new("root"))?);
//! for row in report.to_rows() {
//!     println!("{:?}", row);
//! }
//! # Ok::<(), dirdupes::scanner::ScanError>(())
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io::{self, IsTerminal};
use std::path::Path;

use crate::cli::{Cli, Commands, FixtureArgs, ScanArgs};
use crate::config::Settings;
use crate::duplicates::group;
use crate::error::ExitCode;
use crate::fixture::FixtureTree;
use crate::output::RenderContext;
use crate::scanner::Walker;

/// Run the command described by `cli`, writing the report to stdout.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the scan fails,
/// the fixture cannot be written or the report cannot be printed. The
/// underlying error type (e.g. [`scanner::ScanError`]) is preserved so
/// callers can downcast.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    match cli.command {
        Commands::Scan(ref args) => {
            let stdout = io::stdout();
            let color = use_color(cli.no_color, stdout.is_terminal());
            run_scan(args, cli.config.as_deref(), color, stdout.lock())
        }
        Commands::Fixture(ref args) => run_fixture(args),
    }
}

/// Scan, group and render to `writer`.
///
/// # Errors
///
/// See [`run_app`].
pub fn run_scan<W: io::Write>(
    args: &ScanArgs,
    config_file: Option<&Path>,
    color: bool,
    writer: W,
) -> anyhow::Result<ExitCode> {
    let settings = Settings::load(config_file)?.with_scan_args(args);
    log::debug!("Effective settings: {:?}", settings);

    let outcome = Walker::new(&args.path, settings.scan_config()).scan()?;

    let mut report = group(&outcome.result);
    let summary = report.summary();
    let exit_code = ExitCode::from_scan(&summary, outcome.skipped.len());

    report.sort_by(settings.order);
    if settings.duplicates_only {
        report = report.duplicates_only();
    }

    let ctx = RenderContext::new(&summary, &outcome.skipped, exit_code).with_color(color);
    output::render(&report, settings.output, &ctx, writer)?;

    Ok(exit_code)
}

/// Color only when allowed and stdout is an interactive terminal.
fn use_color(no_color: bool, is_terminal: bool) -> bool {
    !no_color && is_terminal
}

fn run_fixture(args: &FixtureArgs) -> anyhow::Result<ExitCode> {
    let written = FixtureTree::canonical().materialize(&args.path)?;

    for path in &written {
        println!("{}", scanner::path_utils::display_path(path));
    }
    Ok(ExitCode::Success)
}
