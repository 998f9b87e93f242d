//! Asset kind definitions.

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// Kind of bundled asset.
///
/// A bundle holds exactly one kind; the kind decides the output extension,
/// whether `url(...)` references are rewritten, and which HTML tags render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// Style sheets (`.css`).
    Style,
    /// Scripts (`.js`).
    Script,
}

impl AssetKind {
    /// File extension of the bundle body (without dot).
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Style => "css",
            Self::Script => "js",
        }
    }

    /// Whether relative `url(...)` references need rewriting after bundling.
    pub const fn rewrites_paths(self) -> bool {
        matches!(self, Self::Style)
    }

    /// Parse a kind tag (`css`, `js`, `style`, `script`; case-insensitive).
    pub fn parse(tag: &str) -> Result<Self, ConfigError> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "css" | "style" => Ok(Self::Style),
            "js" | "script" => Ok(Self::Script),
            _ => Err(ConfigError::InvalidKind(tag.to_string())),
        }
    }
}

impl FromStr for AssetKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
