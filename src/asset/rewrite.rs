//! `url(...)` rewriting for bundled style sheets.
//!
//! A bundle lives in a different directory than its sources, so every
//! relative reference (`url(../img/x.png)`) is resolved against the source
//! file and re-expressed relative to the public root:
//!
//! ```text
//! /site/assets/css/app.css:  a{background:url(../img/x.png)}
//! public root /site       →  a{background:url(/assets/img/x.png)}
//! ```
//!
//! References that cannot be resolved are kept as written.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::meta::canonical_public_url;

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)url\(\s*(?P<path>.+?)\s*\)").unwrap());

/// Rewrite every `url(...)` in `css` so it is valid from `public_root`.
///
/// `source` is the style sheet the text came from; relative references are
/// resolved against its directory. Without a public root nothing is
/// resolved, but every match is still normalized to `url(<token>)`.
pub fn rewrite_urls(css: &str, source: &Path, public_root: Option<&Path>) -> String {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));

    RE_URL
        .replace_all(css, |caps: &Captures| {
            let token = &caps["path"];
            match public_root.and_then(|root| resolve_reference(token, dir, root)) {
                Some(url) => format!("url({url})"),
                None => format!("url({token})"),
            }
        })
        .into_owned()
}

/// Resolve one captured token to a root-relative URL.
///
/// Returns `None` when the reference is external, does not exist on disk,
/// or lies outside `public_root`.
fn resolve_reference(token: &str, dir: &Path, public_root: &Path) -> Option<String> {
    let (quote, inner) = unquote(token);
    if inner.is_empty() || is_external(inner) {
        return None;
    }

    let (file, suffix) = split_suffix(inner);
    let resolved = dir.join(file).canonicalize().ok()?;
    let url = canonical_public_url(&resolved, public_root)?;

    Some(format!("{quote}{url}{suffix}{quote}"))
}

/// Split surrounding quotes off a token: `"a.png"` → (`"`, `a.png`).
fn unquote(token: &str) -> (&str, &str) {
    for q in ["\"", "'"] {
        if token.len() >= 2
            && let Some(inner) = token.strip_prefix(q).and_then(|t| t.strip_suffix(q))
        {
            return (q, inner);
        }
    }
    ("", token)
}

/// Split a `?query` or `#fragment` suffix off a reference.
fn split_suffix(reference: &str) -> (&str, &str) {
    match reference.find(['?', '#']) {
        Some(pos) => reference.split_at(pos),
        None => (reference, ""),
    }
}

/// `data:` URIs, `scheme://` URLs, protocol-relative and fragment-only
/// references never point at local files.
fn is_external(reference: &str) -> bool {
    if reference.starts_with("//") || reference.starts_with('#') {
        return true;
    }
    // A scheme is ASCII letters followed by ':' before any '/'
    match reference.find(':') {
        Some(pos) => {
            let scheme = &reference[..pos];
            pos > 1 && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// `<tmp>/site/assets/{css/app.css,img/x.png,fonts/f.woff2}`
    fn site() -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap().join("site");
        fs::create_dir_all(root.join("assets/css")).unwrap();
        fs::create_dir_all(root.join("assets/img")).unwrap();
        fs::create_dir_all(root.join("assets/fonts")).unwrap();
        fs::write(root.join("assets/css/app.css"), "").unwrap();
        fs::write(root.join("assets/img/x.png"), "png").unwrap();
        fs::write(root.join("assets/fonts/f.woff2"), "font").unwrap();
        (dir, root)
    }

    #[test]
    fn test_rewrite_relative_to_public_root() {
        let (_dir, root) = site();
        let out = rewrite_urls(
            "a{background:url(../img/x.png)}",
            &root.join("assets/css/app.css"),
            Some(&root),
        );
        assert_eq!(out, "a{background:url(/assets/img/x.png)}");
    }

    #[test]
    fn test_rewrite_multiple_in_order() {
        let (_dir, root) = site();
        let css = "a{background:url(../img/x.png)}b{src:url( ../fonts/f.woff2 )}";
        let out = rewrite_urls(css, &root.join("assets/css/app.css"), Some(&root));
        assert_eq!(
            out,
            "a{background:url(/assets/img/x.png)}b{src:url(/assets/fonts/f.woff2)}"
        );
    }

    #[test]
    fn test_rewrite_keeps_quotes_and_suffix() {
        let (_dir, root) = site();
        let css = r#"@font-face{src:URL("../fonts/f.woff2?v=3#iefix")}"#;
        let out = rewrite_urls(css, &root.join("assets/css/app.css"), Some(&root));
        assert_eq!(
            out,
            r#"@font-face{src:url("/assets/fonts/f.woff2?v=3#iefix")}"#
        );
    }

    #[test]
    fn test_missing_file_keeps_token() {
        let (_dir, root) = site();
        let out = rewrite_urls(
            "a{background:url(  ../img/missing.png )}",
            &root.join("assets/css/app.css"),
            Some(&root),
        );
        assert_eq!(out, "a{background:url(../img/missing.png)}");
    }

    #[test]
    fn test_without_public_root_keeps_token() {
        let (_dir, root) = site();
        let out = rewrite_urls(
            "a{background:url( '../img/x.png' )}",
            &root.join("assets/css/app.css"),
            None,
        );
        assert_eq!(out, "a{background:url('../img/x.png')}");
    }

    #[test]
    fn test_outside_public_root_keeps_token() {
        let (dir, root) = site();
        let other = dir.path().join("other");
        fs::create_dir_all(&other).unwrap();
        let out = rewrite_urls(
            "a{background:url(../img/x.png)}",
            &root.join("assets/css/app.css"),
            Some(&other),
        );
        assert_eq!(out, "a{background:url(../img/x.png)}");
    }

    #[test]
    fn test_external_references_untouched() {
        let (_dir, root) = site();
        let css = "a{background:url(data:image/png;base64,AAAA)}\
                   b{background:url(https://cdn.example.com/x.png)}\
                   c{background:url(//cdn.example.com/x.png)}";
        let out = rewrite_urls(css, &root.join("assets/css/app.css"), Some(&root));
        assert_eq!(out, css);
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("data:image/png;base64,AA"));
        assert!(is_external("https://example.com/a.png"));
        assert!(is_external("//example.com/a.png"));
        assert!(is_external("#filter"));
        assert!(!is_external("../img/a.png"));
        assert!(!is_external("img/a:b.png"));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a.png\""), ("\"", "a.png"));
        assert_eq!(unquote("'a.png'"), ("'", "a.png"));
        assert_eq!(unquote("a.png"), ("", "a.png"));
        assert_eq!(unquote("\""), ("", "\""));
    }
}
