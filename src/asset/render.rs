//! HTML tags for referencing or inlining a bundle.

use std::path::Path;

use super::meta::canonical_public_url;
use super::{AssetKind, BundleTarget};

/// URL under which the bundle body is served.
///
/// Falls back to the filesystem path when there is no public root or the
/// body lies outside it.
pub fn bundle_href(target: &BundleTarget, public_root: Option<&Path>) -> String {
    let body = target.body_path();
    let body = body.canonicalize().unwrap_or(body);
    public_root
        .and_then(|root| canonical_public_url(&body, root))
        .unwrap_or_else(|| body.to_string_lossy().replace('\\', "/"))
}

/// Reference tag: `<link rel="stylesheet" ...>` or `<script src=...>`.
pub fn link_tag(kind: AssetKind, href: &str) -> String {
    let href = escape_attr(href);
    match kind {
        AssetKind::Style => format!(r#"<link rel="stylesheet" href="{href}" />"#),
        AssetKind::Script => format!(r#"<script src="{href}"></script>"#),
    }
}

/// Inline tag wrapping the bundle text.
///
/// A closing tag inside the code would end the element early, so it is
/// escaped.
pub fn inline_tag(kind: AssetKind, code: &str) -> String {
    match kind {
        AssetKind::Style => format!("<style>\n{}\n</style>", escape_close(code, "</style")),
        AssetKind::Script => format!("<script>\n{}\n</script>", escape_close(code, "</script")),
    }
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Replace every case-insensitive `close` (e.g. `</script`) with `<\/script`.
fn escape_close(code: &str, close: &str) -> String {
    let lower = code.to_ascii_lowercase();
    let mut out = String::with_capacity(code.len());
    let mut last = 0;
    for (pos, _) in lower.match_indices(close) {
        out.push_str(&code[last..pos]);
        out.push_str("<\\/");
        out.push_str(&code[pos + 2..pos + close.len()]);
        last = pos + close.len();
    }
    out.push_str(&code[last..]);
    out
}
