//! Output location of a bundle and its bookkeeping files.

use std::path::{Path, PathBuf};

use super::AssetKind;

/// Default base name of a bundle (`app.css`, `app.js`).
pub const DEFAULT_NAME: &str = "app";

/// Extension appended to the body file name for the manifest.
pub const MANIFEST_EXT: &str = "map";

/// Extension appended to the body file name for the build lock.
pub const LOCK_EXT: &str = "lock";

/// Where a bundle is written.
///
/// ```text
/// <output_dir>/<name>.<ext>        bundle body
/// <output_dir>/<name>.<ext>.map    manifest (JSON array of entries)
/// <output_dir>/<name>.<ext>.lock   exclusive build lock
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleTarget {
    pub name: String,
    pub output_dir: PathBuf,
    pub kind: AssetKind,
}

impl BundleTarget {
    pub fn new(output_dir: impl Into<PathBuf>, kind: AssetKind) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            output_dir: output_dir.into(),
            kind,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Body file name, e.g. `app.css`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.kind.extension())
    }

    pub fn body_path(&self) -> PathBuf {
        self.output_dir.join(self.file_name())
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.sibling(MANIFEST_EXT)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.sibling(LOCK_EXT)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn sibling(&self, ext: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{ext}", self.file_name()))
    }
}
