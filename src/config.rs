//! Runtime settings.
//!
//! Command line flags win over the config file, which wins over built in
//! defaults. The config file is optional:
//!
//! ```toml
//! jobs = 4
//! verbose = false
//! ```

use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::ScanOptions;
use crate::error::{Result, SnapError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Files hashed concurrently. 1 means strictly sequential.
    pub jobs: usize,
    pub verbose: bool,
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            jobs: 1,
            verbose: false,
            json_output: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub jobs: Option<usize>,
    pub verbose: Option<bool>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let parsed: FileConfig = toml::from_str(text).map_err(|e| SnapError::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        if parsed.jobs == Some(0) {
            return Err(SnapError::Config {
                path: path.to_path_buf(),
                message: "jobs must be at least 1".to_string(),
            });
        }

        Ok(parsed)
    }

    /// Load an explicitly named file, or the default location when `explicit`
    /// is None. Only the default location may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match default_config_path() {
                Some(path) => (path, false),
                None => return Ok(FileConfig::default()),
            },
        };

        match fs::read_to_string(&path) {
            Ok(text) => FileConfig::parse(&text, &path),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => Ok(FileConfig::default()),
            Err(e) => Err(SnapError::io(&path, e)),
        }
    }
}

/// ~/.config/dirsnap/config.toml or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "dirsnap")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    pub fn from_options(options: &ScanOptions, json_output: bool, file: &FileConfig) -> Self {
        let defaults = Config::default();

        Config {
            jobs: options
                .jobs
                .map(NonZeroUsize::get)
                .or(file.jobs)
                .unwrap_or(defaults.jobs),
            verbose: options.verbose || file.verbose.unwrap_or(defaults.verbose),
            json_output,
        }
    }
}
