//! Public path and URL resolution.

use std::path::{Component, Path};

/// Convert a filesystem path under `public_root` into a root-relative URL.
///
/// Handles cross-platform separators. Returns `None` if `path` is not inside
/// `public_root`, or if the remainder contains `..` (the path is not
/// resolved, so its location under the root is unknown).
///
/// # Example
/// ```ignore
/// let url = public_url(Path::new("/site/assets/x.png"), Path::new("/site"));
/// assert_eq!(url.as_deref(), Some("/assets/x.png"));
/// ```
pub fn public_url(path: &Path, public_root: &Path) -> Option<String> {
    let relative = path.strip_prefix(public_root).ok()?;

    let segments = relative
        .components()
        .map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    Some(format!("/{}", segments.join("/")))
}

/// Like [`public_url`], but canonicalizes `public_root` first so that
/// symlinked roots still match canonical source paths.
pub fn canonical_public_url(path: &Path, public_root: &Path) -> Option<String> {
    public_url(path, public_root).or_else(|| {
        let root = public_root.canonicalize().ok()?;
        public_url(path, &root)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_inside_root() {
        let url = public_url(Path::new("/site/assets/img/x.png"), Path::new("/site"));
        assert_eq!(url.as_deref(), Some("/assets/img/x.png"));
    }

    #[test]
    fn test_public_url_trailing_slash_root() {
        let url = public_url(Path::new("/site/app.css"), Path::new("/site/"));
        assert_eq!(url.as_deref(), Some("/app.css"));
    }

    #[test]
    fn test_public_url_outside_root() {
        assert!(public_url(Path::new("/other/x.png"), Path::new("/site")).is_none());
        // Component-wise match, not string prefix
        assert!(public_url(Path::new("/site2/x.png"), Path::new("/site")).is_none());
    }

    #[test]
    fn test_public_url_rejects_parent_components() {
        assert!(public_url(Path::new("/site/assets/../x.css"), Path::new("/site")).is_none());
        assert!(public_url(Path::new("/site/../other/x.css"), Path::new("/site")).is_none());
    }

    #[test]
    fn test_public_url_root_itself() {
        assert_eq!(
            public_url(Path::new("/site"), Path::new("/site")).as_deref(),
            Some("/")
        );
    }
}
