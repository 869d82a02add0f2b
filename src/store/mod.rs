//! Snapshot file storage.
//!
//! Snapshots persist as a single json document per file. Saving writes a
//! sibling temp file and renames it over the target so a failed write never
//! leaves a truncated snapshot behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SnapError};
use crate::snapshot::Snapshot;

/// Persist a snapshot, overwriting any existing file at `path`.
pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let bytes = snapshot.to_bytes().map_err(|e| e.with_path(path))?;
    let tmp_path = temp_path_for(path);

    let written = fs::File::create(&tmp_path).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(SnapError::io(&tmp_path, e));
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(SnapError::io(path, e));
    }

    log::info!("saved {} entries to {}", snapshot.len(), path.display());
    Ok(())
}

/// Read and decode the snapshot stored at `path`.
pub fn load(path: &Path) -> Result<Snapshot> {
    let bytes = fs::read(path).map_err(|e| SnapError::io(path, e))?;
    let snapshot = Snapshot::from_bytes(&bytes).map_err(|e| e.with_path(path))?;
    log::info!("loaded {} entries from {}", snapshot.len(), path.display());
    Ok(snapshot)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "snapshot".into());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
