use crate::PageText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestSettings {
    /// Body text beyond this many characters is dropped.
    pub max_body_chars: usize,
    /// Digests shorter than this are treated as "nothing useful on the page".
    pub min_digest_chars: usize,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            max_body_chars: 4000,
            min_digest_chars: 50,
        }
    }
}

/// Compose the single text block handed to the model.
pub fn compose_digest(page: &PageText, max_body_chars: usize) -> String {
    let body: String = page.body_text.chars().take(max_body_chars).collect();
    format!(
        "Site Title: {}\nMeta Description: {}\n\nSite Content:\n{}",
        page.title, page.meta_description, body
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_truncates_body_by_characters() {
        let page = PageText {
            title: "Çiçekçi".to_string(),
            meta_description: "Taze çiçek".to_string(),
            body_text: "ğ".repeat(10),
        };
        let digest = compose_digest(&page, 4);
        assert_eq!(
            digest,
            "Site Title: Çiçekçi\nMeta Description: Taze çiçek\n\nSite Content:\nğğğğ"
        );
    }
}
