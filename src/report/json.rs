//! JSON output for diff results.
//!
//! Shape: `{"deleted": [...], "modified": [...], "added": [...]}`.

use std::io::{self, Write};

use crate::diff::DiffResult;

/// Pretty json followed by a newline. Only failures of `writer` surface;
/// the result itself always serializes.
pub fn write<W: Write>(result: &DiffResult, mut writer: W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)
}
