//! Configuration section definitions.
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[build]`    | Output directory, public root, assets base     |
//! | `[minify]`   | Minifier backend and failure policy            |
//! | `[[bundle]]` | One entry per bundle: name, kind, source files |

mod build;
mod bundle;
mod minify;

pub use build::BuildConfig;
pub use bundle::BundleConfig;
pub use minify::{
    DEFAULT_CSS_ENDPOINT, DEFAULT_JS_ENDPOINT, MinifyBackend, MinifyConfig, MinifyFallback,
};
