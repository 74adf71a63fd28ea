use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Node, Selector};

/// Readable pieces of a scraped page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageText {
    pub title: String,
    pub meta_description: String,
    /// Tag-free text with whitespace collapsed to single spaces.
    pub body_text: String,
}

/// Strategy for turning page HTML into [`PageText`].
pub trait HtmlToTextExtractor: Send + Sync {
    fn extract(&self, html: &str) -> PageText;
}

struct Patterns {
    title: Regex,
    meta_description: Regex,
    script: Regex,
    style: Regex,
    noscript: Regex,
    comment: Regex,
    tag: Regex,
    named_entity: Regex,
    whitespace: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    title: Regex::new(r"(?i)<title[^>]*>([^<]*)</title>").expect("valid title regex"),
    meta_description: Regex::new(
        r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']*)["']"#,
    )
    .expect("valid meta regex"),
    script: Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid script regex"),
    style: Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid style regex"),
    noscript: Regex::new(r"(?is)<noscript[^>]*>.*?</noscript>").expect("valid noscript regex"),
    comment: Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"),
    tag: Regex::new(r"<[^>]+>").expect("valid tag regex"),
    named_entity: Regex::new(r"(?i)&[a-z]+;").expect("valid entity regex"),
    whitespace: Regex::new(r"\s+").expect("valid whitespace regex"),
});

/// Best-effort scrubbing with regular expressions. Tolerates broken markup
/// and never fails; nested or unusual markup may leak through.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexTextExtractor;

impl HtmlToTextExtractor for RegexTextExtractor {
    fn extract(&self, html: &str) -> PageText {
        let p = &*PATTERNS;
        let first_capture = |re: &Regex| {
            re.captures(html)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default()
        };

        let mut text = html.to_string();
        for re in [&p.script, &p.style, &p.noscript, &p.comment] {
            text = re.replace_all(&text, "").into_owned();
        }
        let text = p.tag.replace_all(&text, " ");
        let text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");
        let text = p.named_entity.replace_all(&text, " ");
        let body_text = p.whitespace.replace_all(&text, " ").trim().to_string();

        PageText {
            title: first_capture(&p.title),
            meta_description: first_capture(&p.meta_description),
            body_text,
        }
    }
}

/// Parser-backed extractor built on `scraper`; skips script, style,
/// noscript and template subtrees.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScraperTextExtractor;

const SKIPPED_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

impl HtmlToTextExtractor for ScraperTextExtractor {
    fn extract(&self, html: &str) -> PageText {
        let doc = Html::parse_document(html);
        let title_sel = Selector::parse("title").ok();
        let meta_sel = Selector::parse(r#"meta[name="description"]"#).ok();
        let body_sel = Selector::parse("body").ok();

        let title = title_sel
            .as_ref()
            .and_then(|sel| doc.select(sel).next())
            .map(|t| t.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let meta_description = meta_sel
            .as_ref()
            .and_then(|sel| doc.select(sel).next())
            .and_then(|m| m.value().attr("content"))
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        let root = body_sel
            .as_ref()
            .and_then(|sel| doc.select(sel).next())
            .unwrap_or_else(|| doc.root_element());

        let mut pieces = Vec::new();
        for node in root.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| SKIPPED_ELEMENTS.contains(&el.name()))
            });
            if !hidden {
                pieces.extend(text.split_whitespace());
            }
        }

        PageText {
            title,
            meta_description,
            body_text: pieces.join(" "),
        }
    }
}
