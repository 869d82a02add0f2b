//! Content snapshots of directory trees.
//!
//! [`scan::build`] hashes every file under a root into a [`Snapshot`],
//! [`store`] persists snapshots as json and [`diff::compare`] reports which
//! files were deleted, modified or added between two snapshots.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod report;
pub mod scan;
pub mod snapshot;
pub mod store;
pub mod util;

pub use error::{Result, SnapError};
pub use snapshot::{FileRecord, Snapshot};
