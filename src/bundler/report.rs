//! Result of one bundle build and the problems it survived.

use std::fmt;
use std::path::PathBuf;

use crate::cache::{CacheError, StaleReason};
use crate::minify::MinifyError;

/// A problem that degraded a build without failing it.
#[derive(Debug)]
pub enum BuildWarning {
    /// Listed source does not exist; skipped.
    MissingSource(PathBuf),
    /// Source exists but could not be read; skipped.
    UnreadableSource {
        path: PathBuf,
        error: std::io::Error,
    },
    /// Minifier failed; the configured fallback was used.
    MinifyFailed { path: PathBuf, error: MinifyError },
    /// Cached body could not be read; empty code returned.
    CacheRead(CacheError),
    /// Body or manifest could not be written; next build starts over.
    CacheWrite(CacheError),
    /// Build lock unavailable; built unlocked.
    Lock(CacheError),
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource(path) => write!(f, "missing source {}, skipped", path.display()),
            Self::UnreadableSource { path, error } => {
                write!(f, "cannot read {}: {error}", path.display())
            }
            Self::MinifyFailed { path, error } => {
                write!(f, "minify failed for {}: {error}", path.display())
            }
            Self::CacheRead(e) => write!(f, "{e}, returning empty bundle"),
            Self::CacheWrite(e) => write!(f, "{e}, bundle will be rebuilt next time"),
            Self::Lock(e) => write!(f, "{e}, building unlocked"),
        }
    }
}

/// Output of [`Bundler::build`](super::Bundler::build).
#[derive(Debug, Default)]
pub struct BuildOutput {
    /// Bundle text.
    pub code: String,
    /// Whether sources were processed (as opposed to read from cache).
    pub rebuilt: bool,
    /// Why the cache was not used; `None` on a cache hit.
    pub reason: Option<StaleReason>,
    pub warnings: Vec<BuildWarning>,
}

impl BuildOutput {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Sources skipped because they do not exist.
    pub fn missing_sources(&self) -> impl Iterator<Item = &PathBuf> {
        self.warnings.iter().filter_map(|w| match w {
            BuildWarning::MissingSource(path) => Some(path),
            _ => None,
        })
    }
}
