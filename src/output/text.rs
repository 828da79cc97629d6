//! Human-readable text output.
//!
//! ```text
//! "xyz" (3 B, 2 files)
//!   root/a.txt
//!   root/foo/c.txt
//! "123" (3 B, 1 file)
//!   root/foo/d.txt
//!
//! 3 files, 2 distinct contents, 1 duplicate group, 3 B reclaimable
//! ```

use std::io::{self, Write};

use bytesize::ByteSize;
use yansi::Paint;

use super::RenderContext;
use crate::duplicates::{DuplicateGroup, Report};
use crate::scanner::path_utils::display_path;

/// Longest content preview shown in a group header, in characters.
pub const PREVIEW_CHARS: usize = 48;

/// Text output formatter.
pub struct TextOutput<'a> {
    report: &'a Report,
    ctx: &'a RenderContext<'a>,
}

impl<'a> TextOutput<'a> {
    /// Create a new text formatter.
    #[must_use]
    pub fn new(report: &'a Report, ctx: &'a RenderContext<'a>) -> Self {
        Self { report, ctx }
    }

    /// Write the listing, the skipped entries and the summary line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for group in self.report {
            self.write_group(&mut writer, group)?;
        }

        if !self.ctx.skipped.is_empty() {
            writeln!(writer)?;
            let heading = format!("Skipped {} entries:", self.ctx.skipped.len());
            if self.ctx.color {
                writeln!(writer, "{}", heading.yellow().bold())?;
            } else {
                writeln!(writer, "{heading}")?;
            }
            for err in self.ctx.skipped {
                writeln!(writer, "  {err}")?;
            }
        }

        if !self.report.is_empty() {
            writeln!(writer)?;
        }
        writeln!(writer, "{}", self.summary_line())
    }

    fn write_group<W: Write>(&self, writer: &mut W, group: &DuplicateGroup) -> io::Result<()> {
        let noun = if group.len() == 1 { "file" } else { "files" };
        let preview = content_preview(&group.content_str(), PREVIEW_CHARS);
        let stats = format!("({}, {} {noun})", ByteSize::b(group.size()), group.len());

        if self.ctx.color && group.is_duplicate() {
            writeln!(writer, "{} {}", preview.green().bold(), stats.dim())?;
        } else if self.ctx.color {
            writeln!(writer, "{} {}", preview.bold(), stats.dim())?;
        } else {
            writeln!(writer, "{preview} {stats}")?;
        }

        for path in &group.paths {
            writeln!(writer, "  {}", display_path(path))?;
        }
        Ok(())
    }

    fn summary_line(&self) -> String {
        let s = self.ctx.summary;
        let plural = |n: usize, one: &str, many: &str| {
            if n == 1 {
                format!("{n} {one}")
            } else {
                format!("{n} {many}")
            }
        };

        format!(
            "{}, {}, {}, {} reclaimable",
            plural(s.total_files, "file", "files"),
            plural(s.distinct_contents, "distinct content", "distinct contents"),
            plural(s.duplicate_groups, "duplicate group", "duplicate groups"),
            s.reclaimable_display()
        )
    }
}

/// Quote `content` for a one-line header, truncating long values.
///
/// # Example
///
/// ```
/// use dirdupes::output::text::content_preview;
///
/// assert_eq!(content_preview("abc", 10), "\"abc\"");
/// assert_eq!(content_preview("line\nbreak", 20), "\"line\\nbreak\"");
/// assert_eq!(content_preview("abcdefgh", 4), "\"abcd\"...");
/// ```
#[must_use]
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    let truncated = chars.next().is_some();

    let quoted = format!("{head:?}");
    if truncated {
        format!("{quoted}...")
    } else {
        quoted
    }
}
