//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public/dist"      # Bundle output directory (relative to config file)
//! public_root = "public"      # Web root, for rewriting `url(...)` and bundle URLs
//! assets = "assets"           # Base directory for relative bundle entries
//! force = false               # Always rebuild, ignoring the cache
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Bundle output directory.
    pub output: PathBuf,

    /// Filesystem directory served as the web root.
    pub public_root: Option<PathBuf>,

    /// Base directory for relative `files` entries.
    pub assets: Option<PathBuf>,

    /// Rebuild every bundle regardless of cache state.
    pub force: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            public_root: None,
            assets: None,
            force: false,
        }
    }
}

impl BuildConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");
    pub const PUBLIC_ROOT: FieldPath = FieldPath::new("build.public_root");
    pub const ASSETS: FieldPath = FieldPath::new("build.assets");

    /// Resolve all paths against the config file's directory.
    pub fn normalize(&mut self, root: &Path) {
        use crate::utils::path::normalize_path;

        self.output = normalize_path(&root.join(&self.output));
        if let Some(public_root) = self.public_root.take() {
            self.public_root = Some(normalize_path(&root.join(public_root)));
        }
        if let Some(assets) = self.assets.take() {
            self.assets = Some(normalize_path(&root.join(assets)));
        }
    }

    /// Validate `[build]` (after normalization).
    ///
    /// # Checks
    /// - `output` must not be an existing file
    /// - `public_root` should exist and contain `output` (warning)
    /// - `assets` should exist (warning)
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.is_file() {
            diag.error(
                Self::OUTPUT,
                format!("{} is a file: {}", Self::OUTPUT, self.output.display()),
            );
        }

        if let Some(public_root) = &self.public_root {
            if !public_root.is_dir() {
                diag.warn(
                    Self::PUBLIC_ROOT,
                    format!("directory not found: {}", public_root.display()),
                );
            } else if !self.output.starts_with(public_root) {
                diag.warn(
                    Self::PUBLIC_ROOT,
                    "output is outside the public root, bundle URLs fall back to file paths",
                );
            }
        }

        if let Some(assets) = &self.assets
            && !assets.is_dir()
        {
            diag.warn(
                Self::ASSETS,
                format!("directory not found: {}", assets.display()),
            );
        }
    }
}
