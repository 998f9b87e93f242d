//! Minifier backends.
//!
//! The bundler only needs "text in, minified text out". Three backends
//! implement [`Minifier`]:
//!
//! | Backend  | Implementation                                  |
//! |----------|-------------------------------------------------|
//! | `local`  | oxc (scripts) and lightningcss (styles)         |
//! | `remote` | form POST to a minification web service         |
//! | `none`   | identity, for debugging and tests               |

mod local;
mod remote;

pub use local::{LocalMinifier, minify_css, minify_js};
pub use remote::RemoteMinifier;

use thiserror::Error;

use crate::asset::AssetKind;
use crate::config::section::{MinifyBackend, MinifyConfig};

/// Why a minification call produced no usable output.
#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("request to `{url}` failed: {message}")]
    Request { url: String, message: String },

    #[error("request to `{url}` timed out")]
    Timeout { url: String },
}

/// Turns source text of one kind into minified text.
pub trait Minifier {
    /// Minify `source`. Failures are reported, never panicked on.
    fn minify(&self, source: &str, kind: AssetKind) -> Result<String, MinifyError>;

    /// Short backend name for log lines.
    fn name(&self) -> &'static str;
}

impl<M: Minifier + ?Sized> Minifier for Box<M> {
    fn minify(&self, source: &str, kind: AssetKind) -> Result<String, MinifyError> {
        (**self).minify(source, kind)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Identity backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMinifier;

impl Minifier for NoopMinifier {
    fn minify(&self, source: &str, _kind: AssetKind) -> Result<String, MinifyError> {
        Ok(source.to_string())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Create the backend selected in `[minify]`.
pub fn from_config(config: &MinifyConfig) -> Box<dyn Minifier> {
    match config.backend {
        MinifyBackend::Local => Box::new(LocalMinifier),
        MinifyBackend::Remote => Box::new(RemoteMinifier::from_config(config)),
        MinifyBackend::None => Box::new(NoopMinifier),
    }
}
