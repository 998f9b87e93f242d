//! `packup build`

use anyhow::Result;
use packup::config::PackConfig;
use packup::log;
use packup::utils::plural::plural_count;
use packup::{BuildOutput, Bundle, Bundler};

/// Totals over one `build` invocation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub rebuilt: usize,
    pub fresh: usize,
    pub warnings: usize,
}

impl BuildSummary {
    fn record(&mut self, output: &BuildOutput) {
        if output.rebuilt {
            self.rebuilt += 1;
        } else {
            self.fresh += 1;
        }
        self.warnings += output.warnings.len();
    }
}

/// Build the selected bundles (all when `names` is empty).
pub fn build_bundles(config: &PackConfig, names: &[String]) -> Result<BuildSummary> {
    let bundles = config.select(names)?;
    if bundles.is_empty() {
        log!("build"; "no bundles configured");
        return Ok(BuildSummary::default());
    }

    let bundler = Bundler::from_config(config);
    let summary = run(&bundler, &bundles);

    let mut line = format!(
        "{} ({} rebuilt, {} fresh)",
        plural_count(bundles.len(), "bundle"),
        summary.rebuilt,
        summary.fresh
    );
    if summary.warnings > 0 {
        line.push_str(&format!(", {}", plural_count(summary.warnings, "warning")));
    }
    log!("build"; "{}", line);

    Ok(summary)
}

fn run<M: packup::Minifier>(bundler: &Bundler<M>, bundles: &[Bundle]) -> BuildSummary {
    let mut summary = BuildSummary::default();
    for bundle in bundles {
        let output = bundler.build(bundle);
        if !output.rebuilt {
            log!("fresh"; "{}", bundle.target.file_name());
        }
        summary.record(&output);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::fixture::write_project;
    use tempfile::TempDir;

    #[test]
    fn test_build_then_fresh() {
        let dir = TempDir::new().unwrap();
        let config = write_project(dir.path());

        let first = build_bundles(&config, &[]).unwrap();
        assert_eq!(first.rebuilt, 2);
        assert_eq!(first.warnings, 0);

        let second = build_bundles(&config, &[]).unwrap();
        assert_eq!(second.fresh, 2);
    }

    #[test]
    fn test_build_unknown_name() {
        let dir = TempDir::new().unwrap();
        let config = write_project(dir.path());
        assert!(build_bundles(&config, &["nope".into()]).is_err());
    }
}
