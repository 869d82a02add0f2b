//! Marker lines for diff results.
//!
//! Deleted entries come first, then modified, then added, each group in
//! path order. A summary line closes the report.

use crate::diff::{Change, DiffResult};

pub const DELETED_MARKER: &str = "[deleted]";
pub const MODIFIED_MARKER: &str = "[modified]";
pub const ADDED_MARKER: &str = "[added]";

pub fn render(result: &DiffResult) -> String {
    if result.is_empty() {
        return String::from("No changes detected.\n");
    }

    let mut output = String::from("Differences:\n\n");

    for change in result.changes() {
        let marker = match change {
            Change::Deleted(_) => DELETED_MARKER,
            Change::Modified(_) => MODIFIED_MARKER,
            Change::Added(_) => ADDED_MARKER,
        };
        output.push_str(&format!("  {marker:<10} {}\n", change.path()));
    }

    output.push_str(&format!(
        "\n{} deleted, {} modified, {} added\n",
        result.deleted.len(),
        result.modified.len(),
        result.added.len()
    ));

    output
}
