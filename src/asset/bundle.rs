//! Bundle configuration value.

use std::path::PathBuf;

use crate::config::ConfigError;

use super::{AssetKind, AssetSet, BundleTarget};

/// Everything one build needs: what to read, where to write, whether to
/// skip the cache.
///
/// Construction is the only fallible step; once a `Bundle` exists it is a
/// complete, immutable description of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub target: BundleTarget,
    pub assets: AssetSet,
    pub force: bool,
}

impl Bundle {
    /// Create a bundle from a kind tag (`css` / `js`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKind`] for any other tag. No file is
    /// touched in that case.
    pub fn new(
        kind: &str,
        assets: AssetSet,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let kind = AssetKind::parse(kind)?;
        Ok(Self::of_kind(kind, assets, output_dir))
    }

    pub fn of_kind(kind: AssetKind, assets: AssetSet, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            target: BundleTarget::new(output_dir, kind),
            assets,
            force: false,
        }
    }

    /// Style sheet bundle.
    pub fn css(assets: AssetSet, output_dir: impl Into<PathBuf>) -> Self {
        Self::of_kind(AssetKind::Style, assets, output_dir)
    }

    /// Script bundle.
    pub fn js(assets: AssetSet, output_dir: impl Into<PathBuf>) -> Self {
        Self::of_kind(AssetKind::Script, assets, output_dir)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.target = self.target.with_name(name);
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub const fn kind(&self) -> AssetKind {
        self.target.kind
    }
}
