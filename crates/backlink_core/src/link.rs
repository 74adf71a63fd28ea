use regex::{Captures, RegexBuilder};

/// Wrap the first case-insensitive occurrence of `keyword` in an anchor to `url`.
///
/// Text that already carries an anchor is returned untouched, which also makes
/// a second pass a no-op.
pub fn link_keyword(text: &str, keyword: &str, url: &str) -> String {
    if text.contains("<a href=") || keyword.is_empty() {
        return text.to_string();
    }

    let Ok(pattern) = RegexBuilder::new(&regex::escape(keyword))
        .case_insensitive(true)
        .build()
    else {
        return text.to_string();
    };

    pattern
        .replacen(text, 1, |caps: &Captures| {
            format!(
                r#"<a href="{url}" target="_blank" rel="dofollow">{}</a>"#,
                &caps[0]
            )
        })
        .into_owned()
}
