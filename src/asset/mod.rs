//! Bundle inputs, outputs and the pure transforms applied to them.

mod bundle;
mod kind;
mod meta;
mod render;
mod rewrite;
mod set;
mod target;

// Types
pub use bundle::Bundle;
pub use kind::AssetKind;
pub use set::AssetSet;
pub use target::{BundleTarget, DEFAULT_NAME, LOCK_EXT, MANIFEST_EXT};

// Pure transforms
pub use rewrite::rewrite_urls;

// Path and tag helpers
pub use meta::{canonical_public_url, public_url};
pub use render::{bundle_href, inline_tag, link_tag};
