//! Snapshot comparison engine.
//!
//! Classifies every path seen in either snapshot:
//! - only in old: deleted
//! - in both with a different hash: modified
//! - in both with the same hash: unchanged, not reported
//! - only in new: added
//!
//! Size is never compared. The hash alone decides whether a file changed.

use serde::Serialize;

use crate::snapshot::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Deleted(String),
    Modified(String),
    Added(String),
}

impl Change {
    pub fn path(&self) -> &str {
        match self {
            Change::Deleted(path) | Change::Modified(path) | Change::Added(path) => path,
        }
    }
}

/// Changes grouped by kind, each list sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub deleted: Vec<String>,
    pub modified: Vec<String>,
    pub added: Vec<String>,
}

impl DiffResult {
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.modified.is_empty() && self.added.is_empty()
    }

    /// All changes in report order: deleted, then modified, then added.
    pub fn changes(&self) -> Vec<Change> {
        let deleted = self.deleted.iter().cloned().map(Change::Deleted);
        let modified = self.modified.iter().cloned().map(Change::Modified);
        let added = self.added.iter().cloned().map(Change::Added);
        deleted.chain(modified).chain(added).collect()
    }
}

/// Compare two snapshots. Pure, never fails.
pub fn compare(old: &Snapshot, new: &Snapshot) -> DiffResult {
    let mut result = DiffResult::default();

    // both snapshots iterate in path order, so each list comes out sorted
    for record in old.records() {
        match new.get(&record.path) {
            None => result.deleted.push(record.path.clone()),
            Some(current) if current.hash != record.hash => {
                result.modified.push(record.path.clone())
            }
            Some(_) => {}
        }
    }

    for record in new.records() {
        if !old.contains(&record.path) {
            result.added.push(record.path.clone());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::FileRecord;

    fn record(path: &str, size: u64, fill: char) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            size,
            hash: fill.to_string().repeat(64),
        }
    }

    fn snapshot(records: &[FileRecord]) -> Snapshot {
        records.iter().cloned().collect()
    }

    #[test]
    fn added_file_detected() {
        let result = compare(&Snapshot::default(), &snapshot(&[record("a.txt", 5, 'a')]));
        assert_eq!(result.added, vec!["a.txt"]);
        assert!(result.deleted.is_empty());
        assert!(result.modified.is_empty());
    }

    #[test]
    fn deleted_file_detected() {
        let result = compare(&snapshot(&[record("a.txt", 5, 'a')]), &Snapshot::default());
        assert_eq!(result.deleted, vec!["a.txt"]);
        assert!(result.added.is_empty());
    }

    #[test]
    fn modified_file_detected() {
        let result = compare(
            &snapshot(&[record("b.txt", 5, 'a')]),
            &snapshot(&[record("b.txt", 5, 'b')]),
        );
        assert_eq!(result.changes(), vec![Change::Modified("b.txt".to_string())]);
    }

    #[test]
    fn unchanged_file_not_reported() {
        let both = snapshot(&[record("a.txt", 5, 'a')]);
        assert!(compare(&both, &both).is_empty());
    }

    #[test]
    fn size_change_with_same_hash_is_ignored() {
        let result = compare(
            &snapshot(&[record("a.txt", 5, 'a')]),
            &snapshot(&[record("a.txt", 9, 'a')]),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn empty_both_sides_no_changes() {
        let result = compare(&Snapshot::default(), &Snapshot::default());
        assert!(result.is_empty());
        assert!(result.changes().is_empty());
    }

    #[test]
    fn add_and_delete_together() {
        let old = snapshot(&[record("a.txt", 5, 'a'), record("b.txt", 5, 'b')]);
        let new = snapshot(&[record("b.txt", 5, 'b'), record("c.txt", 5, 'c')]);

        let result = compare(&old, &new);
        assert_eq!(
            result.changes(),
            vec![
                Change::Deleted("a.txt".to_string()),
                Change::Added("c.txt".to_string()),
            ]
        );
    }

    #[test]
    fn report_order_is_deleted_modified_added_then_path() {
        let old = snapshot(&[
            record("z_gone", 1, 'a'),
            record("a_gone", 1, 'a'),
            record("m_edit", 1, 'a'),
            record("b_edit", 1, 'a'),
        ]);
        let new = snapshot(&[
            record("m_edit", 1, 'b'),
            record("b_edit", 1, 'b'),
            record("y_new", 1, 'c'),
            record("c_new", 1, 'c'),
        ]);

        let paths: Vec<String> = compare(&old, &new)
            .changes()
            .iter()
            .map(|c| c.path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["a_gone", "z_gone", "b_edit", "m_edit", "c_new", "y_new"]
        );
    }

    #[test]
    fn every_path_classified_once() {
        let old = snapshot(&[record("keep", 1, 'a'), record("edit", 1, 'a'), record("drop", 1, 'a')]);
        let new = snapshot(&[record("keep", 1, 'a'), record("edit", 1, 'b'), record("new", 1, 'a')]);

        let result = compare(&old, &new);
        let changes = result.changes();
        let mut reported: Vec<&str> = changes.iter().map(Change::path).collect();
        reported.sort();
        assert_eq!(reported, vec!["drop", "edit", "new"]);
    }

    #[test]
    fn swapping_sides_swaps_added_and_deleted() {
        let a = snapshot(&[record("shared", 1, 'a'), record("only_a", 1, 'a'), record("edit", 1, 'a')]);
        let b = snapshot(&[record("shared", 1, 'a'), record("only_b", 1, 'b'), record("edit", 1, 'b')]);

        let forward = compare(&a, &b);
        let backward = compare(&b, &a);
        assert_eq!(forward.added, backward.deleted);
        assert_eq!(forward.deleted, backward.added);
        assert_eq!(forward.modified, backward.modified);
    }
}
