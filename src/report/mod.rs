pub mod json;
pub mod text;

use std::io::{self, Write};

use crate::config::Config;
use crate::diff::DiffResult;
use crate::error::{Result, SnapError};
use crate::scan::ScanStats;
use crate::util::format_bytes;

pub fn print_diff(result: &DiffResult, config: &Config) -> Result<()> {
    let mut out = io::stdout().lock();
    let written = if config.json_output {
        json::write(result, &mut out)
    } else {
        out.write_all(text::render(result).as_bytes())
    };
    written.and_then(|_| out.flush()).map_err(SnapError::Output)
}

/// Scan summary on stderr so stdout stays parseable.
pub fn print_scan_info(stats: &ScanStats, verbose: bool) {
    if !verbose {
        return;
    }

    let duration_sec = stats.duration_ms as f64 / 1000.0;
    eprintln!(
        "hashed {} files, {} in {duration_sec:.2}s",
        stats.files,
        format_bytes(stats.total_bytes)
    );

    if let Some(peak_bytes) = stats.peak_memory_bytes {
        eprintln!("peak memory: {}", format_bytes(peak_bytes as u64));
    }
}
