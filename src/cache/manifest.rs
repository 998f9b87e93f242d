//! Manifest persistence.
//!
//! The manifest is the JSON array of entries that produced the current body:
//!
//! ```json
//! ["/assets/css/reset.css","/assets/css/site.css"]
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::CacheError;

/// Read and parse a manifest.
///
/// An empty file is treated as corrupt, not as an empty list.
pub fn read_manifest(path: &Path) -> Result<Vec<String>, CacheError> {
    let content = fs::read_to_string(path).map_err(|e| CacheError::Read(path.to_path_buf(), e))?;
    if content.trim().is_empty() {
        return Err(CacheError::EmptyManifest(path.to_path_buf()));
    }
    serde_json::from_str(&content).map_err(|e| CacheError::Manifest(path.to_path_buf(), e))
}

/// Serialize and atomically write a manifest.
pub fn write_manifest(path: &Path, entries: &[String]) -> Result<(), CacheError> {
    let content = serde_json::to_string(entries)
        .map_err(|e| CacheError::Manifest(path.to_path_buf(), e))?;
    write_atomic(path, content.as_bytes()).map_err(|e| CacheError::Write(path.to_path_buf(), e))
}

/// Write via a temporary file in the same directory, then rename into place.
///
/// Readers never observe a half-written file.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(content)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
