//! Snapshot data model and its json encoding.
//!
//! A snapshot maps relative paths to file records. The persisted form is a
//! single object with one `files` field:
//!
//! ```json
//! {
//!   "files": {
//!     "a.txt": { "path": "a.txt", "size": 5, "hash": "2cf24d..." }
//!   }
//! }
//! ```
//!
//! Field names and nesting are the compatibility contract between `snap`
//! and `diff` runs.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SnapError};

/// Hex length of a sha-256 digest.
pub const HASH_HEX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRecord {
    pub path: String,
    pub size: u64,
    pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    #[serde(deserialize_with = "deserialize_files")]
    files: BTreeMap<String, FileRecord>,
}

/// Like the default map impl, but a repeated path is an error instead of
/// last-one-wins.
fn deserialize_files<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, FileRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FilesVisitor;

    impl<'de> Visitor<'de> for FilesVisitor {
        type Value = BTreeMap<String, FileRecord>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of paths to file records")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut files = BTreeMap::new();
            while let Some((key, record)) = access.next_entry::<String, FileRecord>()? {
                if files.contains_key(&key) {
                    return Err(de::Error::custom(format!("duplicate entry '{key}'")));
                }
                files.insert(key, record);
            }
            Ok(files)
        }
    }

    deserializer.deserialize_map(FilesVisitor)
}

impl Snapshot {
    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Records in path order.
    pub fn records(&self) -> btree_map::Values<'_, String, FileRecord> {
        self.files.values()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files
            .values()
            .fold(0u64, |total, record| total.saturating_add(record.size))
    }

    /// Encode as pretty printed json with a trailing newline.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)
            .map_err(|e| SnapError::format("", e.to_string()))?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Decode and validate a persisted snapshot.
    ///
    /// Missing or unknown fields, a size that is not a non-negative integer,
    /// a hash that is not 64 lowercase hex characters and a map key that
    /// differs from its record's path are all rejected. The returned error
    /// has no path attached; callers add one with [`SnapError::with_path`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_slice(bytes)
            .map_err(|e| SnapError::format("", e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<()> {
        for (key, record) in &self.files {
            if record.path.is_empty() {
                return Err(SnapError::format("", format!("entry '{key}' has an empty path")));
            }
            if *key != record.path {
                return Err(SnapError::format(
                    "",
                    format!("entry '{key}' has mismatched path '{}'", record.path),
                ));
            }
            if !is_valid_hash(&record.hash) {
                return Err(SnapError::format(
                    "",
                    format!(
                        "entry '{key}' has malformed hash '{}' (expected {HASH_HEX_LEN} lowercase hex characters)",
                        record.hash
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl FromIterator<FileRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = FileRecord>>(iter: I) -> Self {
        let files = iter
            .into_iter()
            .map(|record| (record.path.clone(), record))
            .collect();
        Snapshot { files }
    }
}

fn is_valid_hash(hash: &str) -> bool {
    hash.len() == HASH_HEX_LEN
        && hash
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
