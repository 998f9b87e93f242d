//! Exclusive per-target build lock.
//!
//! Held from the staleness check until the body and manifest are committed
//! (or read), so concurrent processes never see a half-updated pair.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::CacheError;

/// Guard for an exclusive lock on `<body>.lock`. Unlocks on drop.
#[derive(Debug)]
pub struct BuildLock {
    file: File,
    path: PathBuf,
}

impl BuildLock {
    /// Block until the lock at `path` is acquired.
    pub fn acquire(path: &Path) -> Result<Self, CacheError> {
        let to_error = |e| CacheError::Lock(path.to_path_buf(), e);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        let file = File::options()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(to_error)?;
        file.lock_exclusive().map_err(to_error)?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Try to take the lock without blocking. `Ok(None)` if it is held.
    pub fn try_acquire(path: &Path) -> Result<Option<Self>, CacheError> {
        let to_error = |e| CacheError::Lock(path.to_path_buf(), e);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        let file = File::options()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(to_error)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self {
                file,
                path: path.to_path_buf(),
            })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(e) => Err(to_error(e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BuildLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
