//! Freshness detection by modification time.

mod mtime;

pub use mtime::{get_mtime, newer_sources};
