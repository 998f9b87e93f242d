//! Mtime-based freshness detection.
//!
//! A bundle body is fresh as long as no source that still exists has been
//! modified after the body was written. Sources that vanished are skipped
//! here; the rebuild pass deals with them.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Sources modified strictly after `output_mtime`.
///
/// Missing or unreadable sources are ignored.
pub fn newer_sources<'a, I>(sources: I, output_mtime: SystemTime) -> Vec<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    sources
        .into_iter()
        .filter(|source| get_mtime(source).is_some_and(|t| t > output_mtime))
        .map(Path::to_path_buf)
        .collect()
}
