//! Report output: CSV serialization and the console table.

use std::fmt::Write as _;
use std::path::Path;

use crate::classify::ClassifiedLine;
use crate::error::Result;

/// Width of the `=` frame around the console table.
const FRAME_WIDTH: usize = 80;

/// Write the accumulated rows to a CSV file with a
/// `Text,Classification` header.
///
/// Values get standard CSV quoting only (embedded separators and
/// quotes), nothing beyond that.
///
/// # Errors
///
/// Returns an error if the file cannot be created or a row fails to
/// serialize.
pub fn write_csv(rows: &[ClassifiedLine], path: &Path) -> Result<()> {
    // Header is written unconditionally so an empty run still produces a
    // well-formed file.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(["Text", "Classification"])?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the rows as a human-readable two-column table, framed above
/// and below by a line of 80 `=` characters.
#[must_use]
pub fn render_table(rows: &[ClassifiedLine]) -> String {
    let frame = "=".repeat(FRAME_WIDTH);
    let text_width = rows
        .iter()
        .map(|r| r.text.chars().count())
        .chain(std::iter::once("Text".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&frame);
    out.push('\n');
    let _ = writeln!(out, "{:<text_width$}  Classification", "Text");
    for row in rows {
        let _ = writeln!(out, "{:<text_width$}  {}", row.text, row.classification);
    }
    out.push_str(&frame);
    out
}
