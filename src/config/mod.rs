//! Bundle configuration management for `packup.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── bundle     # [[bundle]]
//! │   └── minify     # [minify]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # PackConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

pub use util::find_config_file;

// Re-export from section/
pub use section::{BuildConfig, BundleConfig, MinifyBackend, MinifyConfig, MinifyFallback};

// Re-export from types/
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::asset::{AssetKind, AssetSet, Bundle};
use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "packup.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing packup.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Build settings
    pub build: BuildConfig,

    /// Minifier settings
    pub minify: MinifyConfig,

    /// Bundle definitions
    #[serde(rename = "bundle")]
    pub bundles: Vec<BundleConfig>,
}

impl PackConfig {
    /// Load, normalize and validate the config file at `path`.
    ///
    /// Relative paths inside the file resolve against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }

        let mut config = Self::from_path(path)?;
        let root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.finalize(path, &root);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Record file locations and resolve paths against `root`.
    pub fn finalize(&mut self, config_path: &Path, root: &Path) {
        let root = crate::utils::path::normalize_path(root);
        self.config_path = crate::utils::path::normalize_path(config_path);
        self.build.normalize(&root);
        self.root = root;
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Web root used for `url(...)` rewriting and bundle URLs.
    pub fn public_root(&self) -> Option<&Path> {
        self.build.public_root.as_deref()
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate(&mut diag);
        self.minify.validate(&mut diag);

        let mut seen = HashSet::new();
        for (index, bundle) in self.bundles.iter().enumerate() {
            bundle.validate(index, &mut diag);

            // Two entries writing the same body would overwrite each other
            if let Ok(kind) = AssetKind::parse(&bundle.kind)
                && !seen.insert((bundle.name.trim().to_string(), kind))
            {
                diag.error(
                    FieldPath::indexed("bundle", index, "name"),
                    format!("duplicate bundle `{}.{}`", bundle.name.trim(), kind),
                );
            }
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    // ========================================================================
    // bundles
    // ========================================================================

    /// Build the [`Bundle`] value for one `[[bundle]]` entry.
    pub fn to_bundle(&self, entry: &BundleConfig) -> Result<Bundle, ConfigError> {
        // Relative entries resolve against `build.assets`, else the config dir
        let base = self.build.assets.as_deref().unwrap_or(&self.root);
        let assets = AssetSet::new(entry.files.iter().cloned()).with_base(base);

        Ok(Bundle::new(&entry.kind, assets, &self.build.output)?
            .with_name(entry.name.trim())
            .with_force(self.build.force))
    }

    /// All configured bundles, in file order.
    pub fn bundles(&self) -> Result<Vec<Bundle>, ConfigError> {
        self.bundles.iter().map(|b| self.to_bundle(b)).collect()
    }

    /// Bundles selected by name; an empty selection means all.
    ///
    /// A selector matches the base name (`app`, matching both `app.css` and
    /// `app.js`) or the full file name (`app.css`).
    pub fn select(&self, names: &[String]) -> Result<Vec<Bundle>, ConfigError> {
        let all = self.bundles()?;
        if names.is_empty() {
            return Ok(all);
        }

        let mut selected: Vec<Bundle> = Vec::new();
        for name in names {
            let matches: Vec<_> = all
                .iter()
                .filter(|b| b.target.name == *name || b.target.file_name() == *name)
                .filter(|b| !selected.contains(b))
                .cloned()
                .collect();
            if matches.is_empty() && !selected.iter().any(|b| b.target.name == *name) {
                return Err(ConfigError::UnknownBundle(name.clone()));
            }
            selected.extend(matches);
        }
        Ok(selected)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> PackConfig {
    let (parsed, ignored) = PackConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result = PackConfig::from_str("[build\noutput = \"dist\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) =
            PackConfig::parse_with_ignored("[build]\noutput = \"dist\"\nminfy = true").unwrap();
        assert_eq!(ignored, vec!["build.minfy"]);
    }

    #[test]
    fn test_load_resolves_paths_and_bundles() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("public/assets")).unwrap();
        let path = root.join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
[build]
output = "public/dist"
public_root = "public"
assets = "public/assets"

[[bundle]]
kind = "css"
files = ["a.css", "/abs/b.css"]
"#,
        )
        .unwrap();

        let config = PackConfig::load(&path).unwrap();
        assert_eq!(config.get_root(), root);
        assert_eq!(config.public_root(), Some(root.join("public").as_path()));

        let bundles = config.bundles().unwrap();
        assert_eq!(bundles.len(), 1);
        let bundle = &bundles[0];
        assert_eq!(bundle.kind(), AssetKind::Style);
        assert_eq!(bundle.target.body_path(), root.join("public/dist/app.css"));
        assert_eq!(
            bundle.assets.resolve("a.css"),
            root.join("public/assets/a.css")
        );
        assert_eq!(bundle.assets.resolve("/abs/b.css"), PathBuf::from("/abs/b.css"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = PackConfig::load(&dir.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_kind() {
        let config = test_parse_config("[[bundle]]\nkind = \"less\"\nfiles = [\"a.less\"]");
        let err = config.validate().unwrap_err();
        let ConfigError::Diagnostics(diag) = err else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.errors()[0].field.as_str(), "bundle[0].kind");
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = test_parse_config(
            r#"
[[bundle]]
kind = "css"
files = ["a.css"]

[[bundle]]
kind = "js"
files = ["a.js"]

[[bundle]]
kind = "css"
files = ["b.css"]
"#,
        );
        let ConfigError::Diagnostics(diag) = config.validate().unwrap_err() else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "bundle[2].name");
    }

    #[test]
    fn test_select_bundles() {
        let config = test_parse_config(
            r#"
[[bundle]]
kind = "css"
files = ["a.css"]

[[bundle]]
kind = "js"
files = ["a.js"]

[[bundle]]
name = "admin"
kind = "css"
files = ["admin.css"]
"#,
        );

        assert_eq!(config.select(&[]).unwrap().len(), 3);

        let app = config.select(&["app".into()]).unwrap();
        assert_eq!(app.len(), 2);

        let js = config.select(&["app.js".into()]).unwrap();
        assert_eq!(js.len(), 1);
        assert_eq!(js[0].kind(), AssetKind::Script);

        let err = config.select(&["missing".into()]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBundle(ref n) if n == "missing"));
    }

    #[test]
    fn test_force_propagates_to_bundles() {
        let config =
            test_parse_config("[build]\nforce = true\n[[bundle]]\nkind = \"js\"\nfiles = []");
        assert!(config.bundles().unwrap()[0].force);
    }
}
