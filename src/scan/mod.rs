pub mod hash;
pub mod walk;

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::snapshot::{FileRecord, Snapshot};
use walk::FileEntry;

/// Numbers gathered while building a snapshot, shown under --verbose.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub files: usize,
    pub total_bytes: u64,
    pub duration_ms: u128,
    pub peak_memory_bytes: Option<usize>,
}

#[derive(Debug)]
pub struct ScanResult {
    pub snapshot: Snapshot,
    pub stats: ScanStats,
}

/// Snapshot `root` one file at a time.
pub fn build(root: &Path) -> Result<Snapshot> {
    let files = walk::collect_files(root)?;
    Ok(hash_files(&files, 1)?.into_iter().collect())
}

/// Snapshot `root` with the worker count from `config` and collect stats.
pub fn run(root: &Path, config: &Config) -> Result<ScanResult> {
    let start = Instant::now();
    let mut peak = current_memory();

    let files = walk::collect_files(root)?;
    peak = peak.max(current_memory());

    let records = hash_files(&files, config.jobs)?;
    let snapshot: Snapshot = records.into_iter().collect();
    peak = peak.max(current_memory());

    let stats = ScanStats {
        files: snapshot.len(),
        total_bytes: snapshot.total_bytes(),
        duration_ms: start.elapsed().as_millis(),
        peak_memory_bytes: peak,
    };

    log::debug!(
        "hashed {} files ({} bytes) in {}ms",
        stats.files,
        stats.total_bytes,
        stats.duration_ms
    );

    Ok(ScanResult { snapshot, stats })
}

fn current_memory() -> Option<usize> {
    memory_stats::memory_stats().map(|m| m.physical_mem)
}

fn hash_entry(entry: &FileEntry) -> Result<FileRecord> {
    let digest = hash::hash_file(&entry.path)?;
    log::trace!("{} {} {}", digest.hash, digest.size, entry.key);
    Ok(FileRecord {
        path: entry.key.clone(),
        size: digest.size,
        hash: digest.hash,
    })
}

/// Hash every entry, returning records in input order.
///
/// With `jobs > 1` files are handed out to a fixed pool of scoped workers.
/// Indices are claimed in increasing order and every claimed index is
/// finished, so the reported error is always the first failing file in
/// walk order, the same one a sequential run reports.
fn hash_files(files: &[FileEntry], jobs: usize) -> Result<Vec<FileRecord>> {
    if jobs <= 1 || files.len() < 2 {
        return files.iter().map(hash_entry).collect();
    }

    let workers = jobs.min(files.len());
    let next = &AtomicUsize::new(0);
    let failed = &AtomicBool::new(false);

    let mut outcomes: Vec<(usize, Result<FileRecord>)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(move || {
                    let mut done = Vec::new();
                    while !failed.load(Ordering::Relaxed) {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(entry) = files.get(index) else {
                            break;
                        };
                        let outcome = hash_entry(entry);
                        if outcome.is_err() {
                            failed.store(true, Ordering::Relaxed);
                        }
                        done.push((index, outcome));
                    }
                    done
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}
