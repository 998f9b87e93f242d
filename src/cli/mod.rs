//! Command-line interface module.

mod args;
pub mod build;
pub mod render;
pub mod status;

#[cfg(test)]
mod fixture;

pub use args::{Cli, Commands};

use anyhow::{Context, Result};
use packup::config::{ConfigError, PackConfig, find_config_file};
use packup::logger;

/// Locate and load the config file, then apply command-line overrides.
pub fn load_config(cli: &Cli) -> Result<PackConfig> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let path = find_config_file(&cli.config, &cwd)
        .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

    let mut config = PackConfig::load(&path)?;

    if cli.force() {
        config.build.force = true;
    }
    logger::set_verbose(cli.verbose());

    Ok(config)
}
