use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dirsnap")]
#[command(about = "Snapshot a directory tree and report which files changed since")]
#[command(version)]
pub struct Cli {
    /// Read settings from this file instead of the default config location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hash every file under a directory and save the snapshot
    Snap(SnapArgs),

    /// Compare a directory against a saved snapshot
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct ScanOptions {
    /// Number of files hashed in parallel
    #[arg(long, short = 'j')]
    pub jobs: Option<NonZeroUsize>,

    /// Print scan statistics and debug logging to stderr
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct SnapArgs {
    /// Directory to snapshot
    pub directory: PathBuf,

    /// Where to write the snapshot (overwritten if present)
    pub snapshot_file: PathBuf,

    #[command(flatten)]
    pub scan: ScanOptions,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Directory to compare
    pub directory: PathBuf,

    /// Snapshot previously written by `snap`
    pub snapshot_file: PathBuf,

    /// Output as JSON instead of marker lines
    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[command(flatten)]
    pub scan: ScanOptions,
}
