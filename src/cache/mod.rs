//! Bundle cache: staleness decision, commit and read.
//!
//! Each target owns three files next to each other:
//!
//! ```text
//! dist/app.css        body (last built bundle)
//! dist/app.css.map    manifest (entries that produced the body)
//! dist/app.css.lock   build lock (never removed)
//! ```
//!
//! A body is reused only if its manifest exists, parses, equals the current
//! entries, and no existing source is newer than the body.

mod lock;
mod manifest;

pub use lock::BuildLock;
pub use manifest::{read_manifest, write_atomic, write_manifest};

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::asset::{AssetSet, BundleTarget};
use crate::freshness::{get_mtime, newer_sources};

/// Cache I/O errors.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read `{0}`")]
    Read(PathBuf, #[source] io::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] io::Error),

    #[error("invalid manifest `{0}`")]
    Manifest(PathBuf, #[source] serde_json::Error),

    #[error("empty manifest `{0}`")]
    EmptyManifest(PathBuf),

    #[error("failed to lock `{0}`")]
    Lock(PathBuf, #[source] io::Error),
}

/// Why a cached body cannot be reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    MissingBody,
    MissingManifest,
    /// Manifest unreadable, empty or not a JSON list.
    BadManifest(String),
    /// Entries differ from the manifest (content or order).
    EntriesChanged,
    /// A source was modified after the body was written.
    SourceModified(PathBuf),
    /// Manifest matched but the body could not be read back.
    UnreadableBody(String),
    Forced,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBody => f.write_str("no previous bundle"),
            Self::MissingManifest => f.write_str("no manifest"),
            Self::BadManifest(message) => write!(f, "unusable manifest: {message}"),
            Self::EntriesChanged => f.write_str("file list changed"),
            Self::SourceModified(path) => write!(f, "modified: {}", path.display()),
            Self::UnreadableBody(message) => write!(f, "unreadable bundle: {message}"),
            Self::Forced => f.write_str("forced"),
        }
    }
}

/// Result of a staleness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Staleness {
    Fresh,
    Stale(StaleReason),
}

impl Staleness {
    pub const fn is_stale(&self) -> bool {
        matches!(self, Self::Stale(_))
    }
}

/// Files removed by [`BuildCache::clean`].
#[derive(Debug, Default)]
pub struct CleanResult {
    pub removed: Vec<PathBuf>,
}

/// Staleness and persistence for bundle targets.
///
/// Manifest entries are compared in their public-root-relative form, so the
/// configured `public_root` has to be the same at check and commit time.
#[derive(Debug, Clone, Default)]
pub struct BuildCache {
    public_root: Option<PathBuf>,
}

impl BuildCache {
    pub fn new(public_root: Option<PathBuf>) -> Self {
        Self { public_root }
    }

    pub fn public_root(&self) -> Option<&Path> {
        self.public_root.as_deref()
    }

    /// Entries as written to and compared against the manifest.
    pub fn manifest_entries(&self, assets: &AssetSet) -> Vec<String> {
        assets.manifest_entries(self.public_root())
    }

    /// Decide whether `target` has to be rebuilt for `assets`.
    pub fn check(&self, target: &BundleTarget, assets: &AssetSet) -> Staleness {
        let body = target.body_path();
        let Some(body_mtime) = get_mtime(&body) else {
            return Staleness::Stale(StaleReason::MissingBody);
        };

        let manifest_path = target.manifest_path();
        if !manifest_path.exists() {
            return Staleness::Stale(StaleReason::MissingManifest);
        }

        let recorded = match read_manifest(&manifest_path) {
            Ok(recorded) => recorded,
            Err(e) => return Staleness::Stale(StaleReason::BadManifest(e.to_string())),
        };
        if recorded != self.manifest_entries(assets) {
            return Staleness::Stale(StaleReason::EntriesChanged);
        }

        let sources: Vec<_> = assets.iter().map(|(_, path)| path).collect();
        let newer = newer_sources(sources.iter().map(PathBuf::as_path), body_mtime);
        match newer.into_iter().next() {
            Some(path) => Staleness::Stale(StaleReason::SourceModified(path)),
            None => Staleness::Fresh,
        }
    }

    pub fn is_stale(&self, target: &BundleTarget, assets: &AssetSet) -> bool {
        self.check(target, assets).is_stale()
    }

    /// Replace body and manifest.
    ///
    /// The old manifest is removed first and the new one written last, so
    /// a failure at any step leaves the target stale rather than pairing a
    /// manifest with the wrong body.
    pub fn commit(
        &self,
        target: &BundleTarget,
        assets: &AssetSet,
        body: &str,
    ) -> Result<(), CacheError> {
        let dir = target.output_dir();
        fs::create_dir_all(dir).map_err(|e| CacheError::Write(dir.to_path_buf(), e))?;

        let manifest_path = target.manifest_path();
        remove_if_exists(&manifest_path).map_err(|e| CacheError::Write(manifest_path.clone(), e))?;

        let body_path = target.body_path();
        write_atomic(&body_path, body.as_bytes()).map_err(|e| CacheError::Write(body_path, e))?;

        write_manifest(&manifest_path, &self.manifest_entries(assets))
    }

    /// Current body text.
    pub fn read(&self, target: &BundleTarget) -> Result<String, CacheError> {
        let path = target.body_path();
        fs::read_to_string(&path).map_err(|e| CacheError::Read(path, e))
    }

    /// Take the target's exclusive build lock.
    pub fn lock(&self, target: &BundleTarget) -> Result<BuildLock, CacheError> {
        BuildLock::acquire(&target.lock_path())
    }

    /// Remove body and manifest of `target` under its build lock.
    ///
    /// The lock file itself stays, since it is held while cleaning.
    pub fn clean(&self, target: &BundleTarget) -> Result<CleanResult, CacheError> {
        let mut result = CleanResult::default();
        if !target.output_dir().is_dir() {
            return Ok(result);
        }

        let _lock = self.lock(target)?;
        for path in [target.manifest_path(), target.body_path()] {
            if remove_if_exists(&path).map_err(|e| CacheError::Write(path.clone(), e))? {
                result.removed.push(path);
            }
        }
        Ok(result)
    }
}

/// Remove a file; `Ok(false)` if it was not there.
fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests;
