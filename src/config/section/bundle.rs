//! `[[bundle]]` entries.
//!
//! # Example
//!
//! ```toml
//! [[bundle]]
//! name = "app"                # Output base name (default: "app")
//! kind = "css"                # css | js
//! files = ["css/reset.css", "css/site.css"]
//!
//! [[bundle]]
//! name = "vendor"
//! kind = "js"
//! files = ["/srv/shared/jquery.js", "js/app.js"]
//! ```

use crate::asset::{AssetKind, DEFAULT_NAME};
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Output base name.
    pub name: String,
    /// Asset kind tag, parsed at validation time so errors carry a field path.
    pub kind: String,
    /// Source files in concatenation order.
    pub files: Vec<String>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.into(),
            kind: String::new(),
            files: Vec::new(),
        }
    }
}

impl BundleConfig {
    /// Validate the entry at `index` of the `bundle` array.
    ///
    /// # Checks
    /// - `kind` must be `css` or `js`
    /// - `name` must be a plain, non-empty file name
    /// - `files` should not be empty (warning)
    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        if let Err(e) = AssetKind::parse(&self.kind) {
            diag.error_with_hint(
                FieldPath::indexed("bundle", index, "kind"),
                e.to_string(),
                "use `css` or `js`",
            );
        }

        let name = self.name.trim();
        if name.is_empty() {
            diag.error(
                FieldPath::indexed("bundle", index, "name"),
                "bundle name must not be empty",
            );
        } else if name.contains(['/', '\\']) || name == "." || name == ".." {
            diag.error(
                FieldPath::indexed("bundle", index, "name"),
                format!("bundle name `{name}` must be a file name, not a path"),
            );
        }

        if self.files.is_empty() {
            diag.warn(
                FieldPath::indexed("bundle", index, "files"),
                format!("bundle `{name}` has no files"),
            );
        }
    }
}
