use std::sync::LazyLock;

use regex::Regex;

use crate::link_keyword;

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a[^>]*href="[^"]*"[^>]*>([^<]*)</a>"#).expect("valid anchor regex")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Split a model reply on `---` separators, dropping blank pieces, and link
/// the keyword in each remaining piece.
pub fn split_generated_items(reply: &str, keyword: &str, url: &str) -> Vec<String> {
    reply
        .split("---")
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| link_keyword(piece, keyword, url))
        .collect()
}

/// Text form of an HTML item: anchors collapse to their text, other tags go.
pub fn plain_text(html: &str) -> String {
    let without_anchors = ANCHOR.replace_all(html, "$1");
    TAG.replace_all(&without_anchors, "")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
}
