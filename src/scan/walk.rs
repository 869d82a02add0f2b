//! Directory traversal.
//!
//! Produces the complete list of files under a root before any hashing
//! starts, so a traversal error never leaves a half built snapshot.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SnapError};

/// A file found during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path on disk, rooted at the walk root.
    pub path: PathBuf,
    /// Forward-slash path relative to the walk root.
    pub key: String,
}

pub fn collect_files(root: &Path) -> Result<Vec<FileEntry>> {
    let metadata = fs::metadata(root).map_err(|e| SnapError::io(root, e))?;
    if !metadata.is_dir() {
        return Err(SnapError::io(
            root,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }

    log::debug!("walking {}", root.display());

    let mut files = Vec::new();

    // links are not descended. a link to a regular file is still recorded
    // because reading it reads the target.
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        let file_type = entry.file_type();

        if file_type.is_dir() {
            continue;
        }

        if file_type.is_symlink() {
            let target = fs::metadata(entry.path()).map_err(|e| SnapError::io(entry.path(), e))?;
            if !target.is_file() {
                log::debug!("skipping link to non-file {}", entry.path().display());
                continue;
            }
        } else if !file_type.is_file() {
            log::debug!("skipping special file {}", entry.path().display());
            continue;
        }

        let key = relative_key(root, entry.path())?;
        files.push(FileEntry {
            path: entry.into_path(),
            key,
        });
    }

    log::debug!("found {} files under {}", files.len(), root.display());
    Ok(files)
}

fn walk_error(root: &Path, err: walkdir::Error) -> SnapError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
    SnapError::Io { path, source }
}

/// Relative path from `root` to `path`, joined with `/` whatever the
/// platform separator is.
pub fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        SnapError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not under {}", root.display()),
            ),
        )
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        let Component::Normal(name) = component else {
            return Err(SnapError::io(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "unexpected path component"),
            ));
        };
        let name = name.to_str().ok_or_else(|| {
            SnapError::io(
                path,
                io::Error::new(io::ErrorKind::InvalidData, "file name is not valid utf-8"),
            )
        })?;
        parts.push(name);
    }

    if parts.is_empty() {
        return Err(SnapError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path is the walk root itself"),
        ));
    }

    Ok(parts.join("/"))
}
