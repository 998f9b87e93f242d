//! `packup status` and `packup clean`

use anyhow::Result;
use packup::config::PackConfig;
use packup::log;
use packup::utils::plural::plural_count;
use packup::{BuildCache, Staleness};

fn cache_for(config: &PackConfig) -> BuildCache {
    BuildCache::new(config.public_root().map(Into::into))
}

/// Staleness of each selected bundle, keyed by file name.
pub fn check_bundles(config: &PackConfig, names: &[String]) -> Result<Vec<(String, Staleness)>> {
    let cache = cache_for(config);
    let states = config
        .select(names)?
        .into_iter()
        .map(|b| (b.target.file_name(), cache.check(&b.target, &b.assets)))
        .collect();
    Ok(states)
}

/// Print one line per bundle.
pub fn show_status(config: &PackConfig, names: &[String]) -> Result<()> {
    for (name, state) in check_bundles(config, names)? {
        match state {
            Staleness::Fresh => log!("fresh"; "{}", name),
            Staleness::Stale(reason) => log!("stale"; "{}: {}", name, reason),
        }
    }
    Ok(())
}

/// Remove body and manifest of each selected bundle.
pub fn clean_bundles(config: &PackConfig, names: &[String]) -> Result<usize> {
    let cache = cache_for(config);
    let mut removed = 0;
    for bundle in config.select(names)? {
        let result = cache.clean(&bundle.target)?;
        for path in &result.removed {
            packup::debug!("clean"; "removed {}", path.display());
        }
        removed += result.removed.len();
    }
    log!("clean"; "removed {}", plural_count(removed, "file"));
    Ok(removed)
}
