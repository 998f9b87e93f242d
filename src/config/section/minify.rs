//! `[minify]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [minify]
//! backend = "remote"          # local | remote | none
//! on_failure = "source"       # empty | source
//! timeout = 10                # seconds per request (remote only)
//! css_endpoint = "https://www.toptal.com/developers/cssminifier/raw"
//! js_endpoint = "https://www.toptal.com/developers/javascript-minifier/raw"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CSS_ENDPOINT: &str = "https://www.toptal.com/developers/cssminifier/raw";
pub const DEFAULT_JS_ENDPOINT: &str = "https://www.toptal.com/developers/javascript-minifier/raw";

/// Which minifier turns sources into bundle chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyBackend {
    /// In-process: oxc for scripts, lightningcss for styles.
    #[default]
    Local,
    /// Form POST to a minification web service.
    Remote,
    /// Concatenate sources unchanged.
    None,
}

/// What a file contributes when its minification fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyFallback {
    /// Contribute nothing.
    #[default]
    Empty,
    /// Contribute the unminified source.
    Source,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    pub backend: MinifyBackend,
    pub on_failure: MinifyFallback,
    /// Request timeout in seconds.
    pub timeout: u64,
    pub css_endpoint: String,
    pub js_endpoint: String,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            backend: MinifyBackend::Local,
            on_failure: MinifyFallback::Empty,
            timeout: 10,
            css_endpoint: DEFAULT_CSS_ENDPOINT.into(),
            js_endpoint: DEFAULT_JS_ENDPOINT.into(),
        }
    }
}

impl MinifyConfig {
    pub const TIMEOUT: FieldPath = FieldPath::new("minify.timeout");
    pub const CSS_ENDPOINT: FieldPath = FieldPath::new("minify.css_endpoint");
    pub const JS_ENDPOINT: FieldPath = FieldPath::new("minify.js_endpoint");

    /// Validate `[minify]`.
    ///
    /// Only the remote backend has settings that can be wrong.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.backend != MinifyBackend::Remote {
            return;
        }

        if self.timeout == 0 {
            diag.error_with_hint(
                Self::TIMEOUT,
                format!("{} must be greater than 0", Self::TIMEOUT),
                "a stalled service would otherwise block the build forever",
            );
        }

        for (field, endpoint) in [
            (Self::CSS_ENDPOINT, &self.css_endpoint),
            (Self::JS_ENDPOINT, &self.js_endpoint),
        ] {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                diag.error(
                    field.clone(),
                    format!("{field} must be an http(s) URL, got `{endpoint}`"),
                );
            }
        }
    }
}
