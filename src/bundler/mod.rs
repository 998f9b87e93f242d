//! Per-target build orchestration.
//!
//! ```text
//! lock target ─► check cache ─┬─ fresh ─► read body (unreadable: rebuild)
//!                             └─ stale ─► for each source (in order):
//!                                           read ─► minify ─► rewrite (css)
//!                                         concatenate ─► commit
//! ```
//!
//! A build never fails. Everything that goes wrong on the way is recorded as
//! a [`BuildWarning`] and logged, and the best available code is returned.

mod report;

pub use report::{BuildOutput, BuildWarning};

use std::fs;
use std::path::{Path, PathBuf};

use crate::asset::{AssetKind, Bundle, rewrite_urls};
use crate::cache::{BuildCache, StaleReason, Staleness};
use crate::config::{MinifyFallback, PackConfig};
use crate::logger::ProgressLine;
use crate::minify::{self, Minifier};
use crate::utils::plural::plural_count;
use crate::{debug, log};

/// Builds bundles with one minifier backend.
pub struct Bundler<M: Minifier> {
    minifier: M,
    cache: BuildCache,
    on_failure: MinifyFallback,
    quiet: bool,
}

impl Bundler<Box<dyn Minifier>> {
    /// Bundler using the backend and public root from `config`.
    pub fn from_config(config: &PackConfig) -> Self {
        Bundler::new(
            minify::from_config(&config.minify),
            config.public_root().map(Path::to_path_buf),
        )
        .with_fallback(config.minify.on_failure)
    }
}

impl<M: Minifier> Bundler<M> {
    pub fn new(minifier: M, public_root: Option<PathBuf>) -> Self {
        Self {
            minifier,
            cache: BuildCache::new(public_root),
            on_failure: MinifyFallback::default(),
            quiet: false,
        }
    }

    /// What a source contributes when its minification fails.
    pub fn with_fallback(mut self, on_failure: MinifyFallback) -> Self {
        self.on_failure = on_failure;
        self
    }

    /// Suppress the progress line and per-build log lines (warnings are
    /// still logged).
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn cache(&self) -> &BuildCache {
        &self.cache
    }

    pub fn minifier(&self) -> &M {
        &self.minifier
    }

    /// Return the bundle text, rebuilding it if the cache is stale or
    /// `bundle.force` is set.
    pub fn build(&self, bundle: &Bundle) -> BuildOutput {
        let target = &bundle.target;
        let mut output = BuildOutput::default();

        // Held until the end of this function
        let _lock = match self.cache.lock(target) {
            Ok(lock) => Some(lock),
            Err(e) => {
                self.warn(&mut output, BuildWarning::Lock(e));
                None
            }
        };

        let staleness = if bundle.force {
            Staleness::Stale(StaleReason::Forced)
        } else {
            self.cache.check(target, &bundle.assets)
        };

        let reason = match staleness {
            Staleness::Stale(reason) => reason,
            Staleness::Fresh => match self.cache.read(target) {
                Ok(code) => {
                    debug!("fresh"; "{} is up to date", target.file_name());
                    output.code = code;
                    return output;
                }
                Err(e) => {
                    let reason = StaleReason::UnreadableBody(e.to_string());
                    self.warn(&mut output, BuildWarning::CacheRead(e));
                    reason
                }
            },
        };

        if !self.quiet {
            log!("build"; "{} ({}, {})",
                target.file_name(), reason, plural_count(bundle.assets.len(), "file"));
        }
        let code = self.concatenate(bundle, &mut output);
        output.code = code;
        output.rebuilt = true;
        output.reason = Some(reason);

        if let Err(e) = self.cache.commit(target, &bundle.assets, &output.code) {
            self.warn(&mut output, BuildWarning::CacheWrite(e));
        }
        output
    }

    /// Process every source in order and join the chunks.
    fn concatenate(&self, bundle: &Bundle, output: &mut BuildOutput) -> String {
        let kind = bundle.kind();
        let total = bundle.assets.len();
        let progress = (!self.quiet).then(|| ProgressLine::new(bundle.target.file_name(), total));

        let mut code = String::new();
        for (entry, path) in bundle.assets.iter() {
            if let Some(chunk) = self.process(&path, kind, output) {
                debug!("bundle"; "{} -> {} bytes", entry, chunk.len());
                code.push_str(&chunk);
            }
            if let Some(p) = &progress {
                p.inc();
            }
        }

        if let Some(p) = progress {
            p.finish();
        }
        code
    }

    /// Chunk contributed by one source; `None` if it is skipped.
    fn process(&self, path: &Path, kind: AssetKind, output: &mut BuildOutput) -> Option<String> {
        if !path.is_file() {
            self.warn(output, BuildWarning::MissingSource(path.to_path_buf()));
            return None;
        }

        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(error) => {
                let warning = BuildWarning::UnreadableSource {
                    path: path.to_path_buf(),
                    error,
                };
                self.warn(output, warning);
                return None;
            }
        };

        let minified = match self.minifier.minify(&source, kind) {
            Ok(minified) => minified,
            Err(error) => {
                let warning = BuildWarning::MinifyFailed {
                    path: path.to_path_buf(),
                    error,
                };
                self.warn(output, warning);
                match self.on_failure {
                    MinifyFallback::Empty => String::new(),
                    MinifyFallback::Source => source,
                }
            }
        };

        Some(if kind.rewrites_paths() {
            rewrite_urls(&minified, path, self.cache.public_root())
        } else {
            minified
        })
    }

    fn warn(&self, output: &mut BuildOutput, warning: BuildWarning) {
        log!("warning"; "{}", warning);
        output.warnings.push(warning);
    }
}
