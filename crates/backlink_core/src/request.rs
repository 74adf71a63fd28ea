use crate::{ContentType, FormSettings, UrlKeywordPair};

/// Payload for one content-generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub url: String,
    pub keyword: String,
    pub brand: String,
    pub description: String,
    pub language: String,
    pub content_type: ContentType,
    pub word_count: u32,
    pub batch_size: u32,
}

impl BatchRequest {
    pub fn build(pair: &UrlKeywordPair, settings: &FormSettings, batch_size: u32) -> Self {
        Self {
            url: pair.url.clone(),
            keyword: pair.keyword.clone(),
            brand: settings.brand.clone(),
            description: settings.description.clone(),
            language: settings.language.clone(),
            content_type: settings.content_type,
            word_count: settings.word_count,
            batch_size,
        }
    }
}
