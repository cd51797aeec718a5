//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "aurora";
const APPLICATION: &str = "aurora-demo";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the path to the latest log file, creating its directory.
///
/// - Linux: `$XDG_CACHE_HOME/aurora-demo/latest.log`
/// - macOS: `~/Library/Caches/dev.aurora.aurora-demo/latest.log`
///
/// Falls back to `aurora-demo.log` in the working directory.
pub fn log_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .filter(|dir| fs::create_dir_all(dir).is_ok())
        .map(|dir| dir.join("latest.log"))
        .unwrap_or_else(|| PathBuf::from("aurora-demo.log"))
}
