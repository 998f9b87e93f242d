//! Ordered list of source files feeding one bundle.

use std::path::{Path, PathBuf};

use super::meta::public_url;

/// Ordered sequence of source file entries.
///
/// Order is the concatenation order. Duplicates are kept. Entries are stored
/// exactly as configured; relative entries resolve against the optional
/// assets directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSet {
    entries: Vec<String>,
    base: Option<PathBuf>,
}

impl AssetSet {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            base: None,
        }
    }

    /// Resolve relative entries against `dir`.
    pub fn with_base(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base = Some(dir.into());
        self
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filesystem location of one entry.
    pub fn resolve(&self, entry: &str) -> PathBuf {
        let path = Path::new(entry);
        match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Iterate `(entry, path)` pairs in configured order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PathBuf)> + '_ {
        self.entries.iter().map(|e| (e.as_str(), self.resolve(e)))
    }

    /// Entries in the form recorded in the manifest.
    ///
    /// Entries located under `public_root` are written root-relative
    /// (`/css/app.css`); everything else is written as its resolved path,
    /// so moving the base directory changes the manifest.
    pub fn manifest_entries(&self, public_root: Option<&Path>) -> Vec<String> {
        self.iter()
            .map(|(_, path)| {
                public_root
                    .and_then(|root| public_url(&path, root))
                    .unwrap_or_else(|| path.to_string_lossy().into_owned())
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AssetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
