//! Config field paths for diagnostics.

use owo_colors::OwoColorize;
use std::borrow::Cow;
use std::fmt;

/// Dotted path of a config field, e.g. `minify.timeout` or `bundle[1].kind`.
///
/// Static paths are declared as constants next to their section:
///
/// ```ignore
/// impl MinifyConfig {
///     pub const TIMEOUT: FieldPath = FieldPath::new("minify.timeout");
/// }
///
/// diag.error(MinifyConfig::TIMEOUT, "must be greater than 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of a field inside an array-of-tables entry: `bundle[2].kind`.
    pub fn indexed(section: &str, index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("{section}[{index}].{field}")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_path() {
        const PATH: FieldPath = FieldPath::new("build.output");
        assert_eq!(PATH.as_str(), "build.output");
    }

    #[test]
    fn test_indexed_path() {
        let path = FieldPath::indexed("bundle", 2, "kind");
        assert_eq!(path.as_str(), "bundle[2].kind");
        assert!(path.to_string().contains("bundle[2].kind"));
    }
}
