//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// packup - incremental CSS/JS bundler
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, global = true, default_value = "packup.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build bundles, reusing cached output when sources are unchanged
    #[command(visible_alias = "b")]
    Build {
        /// Bundles to build (`app`, `app.css`); all when omitted
        #[arg(value_name = "NAME")]
        names: Vec<String>,

        /// Rebuild even if the cache is fresh
        #[arg(short, long)]
        force: bool,

        /// Enable verbose output for debugging
        #[arg(short = 'V', long)]
        verbose: bool,
    },

    /// Print the HTML tag for a bundle, building it first if stale
    #[command(visible_alias = "r")]
    Render {
        /// Bundle to render (`app.css`, or `app` if unambiguous)
        name: String,

        /// Embed the bundle text instead of referencing the file
        #[arg(short, long)]
        inline: bool,
    },

    /// Show whether bundles are fresh or stale, and why
    #[command(visible_alias = "s")]
    Status {
        #[arg(value_name = "NAME")]
        names: Vec<String>,
    },

    /// Remove bundle, manifest and lock files
    Clean {
        #[arg(value_name = "NAME")]
        names: Vec<String>,
    },
}

impl Cli {
    /// `--force` given on the command line.
    pub const fn force(&self) -> bool {
        matches!(self.command, Commands::Build { force: true, .. })
    }

    /// `--verbose` given on the command line.
    pub const fn verbose(&self) -> bool {
        matches!(self.command, Commands::Build { verbose: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from(["packup", "build", "app", "admin.css", "-f", "-V"]);
        assert!(cli.force());
        assert!(cli.verbose());
        let Commands::Build { names, .. } = &cli.command else {
            panic!("expected build");
        };
        assert_eq!(names, &["app", "admin.css"]);
        assert_eq!(cli.config, PathBuf::from("packup.toml"));
    }

    #[test]
    fn test_parse_render_with_config() {
        let cli = Cli::parse_from(["packup", "render", "app.css", "--inline", "-C", "site.toml"]);
        assert!(!cli.force());
        assert!(matches!(
            cli.command,
            Commands::Render { ref name, inline: true } if name == "app.css"
        ));
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
