//! packup - incremental CSS/JS bundler.
//!
//! Concatenates an ordered list of style sheets or scripts into one minified
//! bundle and reuses the previous bundle until a source changes.
//!
//! ```ignore
//! use packup::{AssetSet, Bundle, Bundler, LocalMinifier};
//!
//! let bundle = Bundle::css(AssetSet::new(["/site/css/reset.css", "/site/css/app.css"]), "/site/dist");
//! let bundler = Bundler::new(LocalMinifier, Some("/site".into()));
//! let output = bundler.build(&bundle);
//! println!("{}", output.code);
//! ```

pub mod logger;

pub mod asset;
pub mod bundler;
pub mod cache;
pub mod config;
pub mod freshness;
pub mod minify;
pub mod utils;

pub use asset::{AssetKind, AssetSet, Bundle, BundleTarget, rewrite_urls};
pub use bundler::{BuildOutput, BuildWarning, Bundler};
pub use cache::{BuildCache, CacheError, StaleReason, Staleness};
pub use config::{ConfigError, PackConfig};
pub use minify::{LocalMinifier, Minifier, MinifyError, NoopMinifier, RemoteMinifier};
