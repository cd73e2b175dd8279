//! Runtime configuration.
//!
//! Supports:
//! - Default values
//! - Environment variables (`PROTOSQL_*`)
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `PROTOSQL_BUNDLE_PATH` | Directories searched for relative bundle paths (platform path-list syntax) |
//! | `PROTOSQL_WARN_UNSIGNED` | `0`/`false`/`no`/`off` silences the warning on wrapped `uint64` values |

use std::env;
use std::path::{Path, PathBuf};

pub const BUNDLE_PATH_ENV: &str = "PROTOSQL_BUNDLE_PATH";
pub const WARN_UNSIGNED_ENV: &str = "PROTOSQL_WARN_UNSIGNED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Search path for relative bundle file names
    pub bundle_path: Vec<PathBuf>,

    /// Warn when an unsigned 64-bit value wraps into a negative integer
    pub warn_on_unsigned: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bundle_path: Vec::new(),
            warn_on_unsigned: true,
        }
    }
}

impl Config {
    /// Defaults overridden by `PROTOSQL_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(paths) = env::var_os(BUNDLE_PATH_ENV) {
            config.bundle_path = env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
        }

        if let Ok(value) = env::var(WARN_UNSIGNED_ENV) {
            config.warn_on_unsigned = parse_flag(&value).unwrap_or(config.warn_on_unsigned);
        }

        config
    }

    /// Resolve a bundle file name.
    ///
    /// Absolute paths and paths that exist relative to the working directory
    /// are returned unchanged. Otherwise the first search-path directory that
    /// contains the file wins. Falls back to the path as given so the caller
    /// reports the requested name when the file is missing.
    pub fn resolve_bundle(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || path.exists() {
            return path.to_path_buf();
        }

        self.bundle_path
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
            .unwrap_or_else(|| path.to_path_buf())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
