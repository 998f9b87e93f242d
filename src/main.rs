//! packup - incremental CSS/JS bundler.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    // stdout carries only the rendered tag
    if matches!(cli.command, Commands::Render { .. }) {
        packup::logger::set_stderr_only(true);
    }

    let config = cli::load_config(&cli)?;

    match &cli.command {
        Commands::Build { names, .. } => cli::build::build_bundles(&config, names).map(|_| ()),
        Commands::Render { name, inline } => cli::render::render_bundle(&config, name, *inline),
        Commands::Status { names } => cli::status::show_status(&config, names),
        Commands::Clean { names } => cli::status::clean_bundles(&config, names).map(|_| ()),
    }
}
