use std::sync::Arc;

use backlink_logging::{backlink_debug, backlink_info, backlink_warn};

use crate::prompt::describe_system_prompt;
use crate::{
    build_describe_prompt, compose_digest, decode_page, ChatClient, ChatRequest, DigestSettings,
    FailureKind, FetchError, Fetcher, HtmlToTextExtractor,
};

/// Hosts that serve login walls or script-only shells to scrapers.
pub const SOCIAL_MEDIA_DOMAINS: [&str; 10] = [
    "instagram.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "tiktok.com",
    "linkedin.com",
    "youtube.com",
    "pinterest.com",
    "snapchat.com",
    "reddit.com",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescribeError {
    #[error("URL is required")]
    MissingUrl,
    #[error("Invalid URL format. It must start with http:// or https://.")]
    InvalidUrl,
    #[error(
        "Social media sites (Instagram, Facebook, etc.) do not support automatic analysis. \
         Enter the business description manually."
    )]
    SocialMedia,
    #[error("Site content could not be retrieved or is insufficient. The site may require JavaScript.")]
    InsufficientContent,
    #[error("{0}")]
    UpstreamRateLimited(String),
    #[error("{0}")]
    UpstreamForbidden(String),
    #[error("{0}")]
    UpstreamHttpError(String),
    #[error("{0}")]
    FetchTimeout(String),
    #[error("{0}")]
    Fetch(String),
    #[error("AI service is not responding right now. Please try again.")]
    Llm,
    #[error("{0}")]
    Remote(String),
}

impl DescribeError {
    /// HTTP status for the `/describe` endpoint: 400 for input problems,
    /// 500 for anything that went wrong upstream.
    pub fn status(&self) -> u16 {
        match self {
            DescribeError::MissingUrl
            | DescribeError::InvalidUrl
            | DescribeError::SocialMedia
            | DescribeError::InsufficientContent => 400,
            _ => 500,
        }
    }
}

impl From<FetchError> for DescribeError {
    fn from(err: FetchError) -> Self {
        match err.kind {
            FailureKind::RateLimited => DescribeError::UpstreamRateLimited(err.message),
            FailureKind::Forbidden => DescribeError::UpstreamForbidden(err.message),
            FailureKind::HttpStatus(_) => DescribeError::UpstreamHttpError(err.message),
            FailureKind::Timeout => DescribeError::FetchTimeout(err.message),
            _ => DescribeError::Fetch(err.message),
        }
    }
}

pub fn is_social_media_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    SOCIAL_MEDIA_DOMAINS
        .iter()
        .any(|domain| lower.contains(domain))
}

/// Input checks done before any network traffic.
pub fn validate_describe_url(url: &str) -> Result<(), DescribeError> {
    if url.is_empty() {
        return Err(DescribeError::MissingUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(DescribeError::InvalidUrl);
    }
    if is_social_media_url(url) {
        return Err(DescribeError::SocialMedia);
    }
    Ok(())
}

/// Drafts a business description for a URL.
#[async_trait::async_trait]
pub trait Describer: Send + Sync {
    async fn describe(&self, url: &str, language: Option<&str>) -> Result<String, DescribeError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescribeSettings {
    pub digest: DigestSettings,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for DescribeSettings {
    fn default() -> Self {
        Self {
            digest: DigestSettings::default(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Fetches a page and reduces it to the digest handed to the model.
pub struct PageDigester {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn HtmlToTextExtractor>,
    settings: DigestSettings,
}

impl PageDigester {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn HtmlToTextExtractor>,
        settings: DigestSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            settings,
        }
    }

    /// Validate, fetch and reduce the page to a digest. Fails with
    /// `InsufficientContent` when the digest is too short to describe.
    pub async fn digest(&self, url: &str) -> Result<String, DescribeError> {
        validate_describe_url(url)?;

        let output = self.fetcher.fetch(url).await?;
        let decoded = decode_page(&output.bytes, output.metadata.content_type.as_deref());
        backlink_debug!(
            "decoded page url={} encoding={} bytes={}",
            output.metadata.final_url,
            decoded.encoding_label,
            output.metadata.byte_len
        );

        let page = self.extractor.extract(&decoded.html);
        let digest = compose_digest(&page, self.settings.max_body_chars);
        let chars = digest.chars().count();
        if chars < self.settings.min_digest_chars {
            backlink_warn!("digest too short url={} chars={}", url, chars);
            return Err(DescribeError::InsufficientContent);
        }
        Ok(digest)
    }
}

pub struct DescribeService {
    digester: PageDigester,
    chat: Arc<dyn ChatClient>,
    settings: DescribeSettings,
}

impl DescribeService {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn HtmlToTextExtractor>,
        chat: Arc<dyn ChatClient>,
        settings: DescribeSettings,
    ) -> Self {
        Self {
            digester: PageDigester::new(fetcher, extractor, settings.digest),
            chat,
            settings,
        }
    }

    pub async fn digest(&self, url: &str) -> Result<String, DescribeError> {
        self.digester.digest(url).await
    }
}

#[async_trait::async_trait]
impl Describer for DescribeService {
    async fn describe(&self, url: &str, language: Option<&str>) -> Result<String, DescribeError> {
        let digest = self.digest(url).await?;
        backlink_info!("describing url={} digest_chars={}", url, digest.chars().count());

        let reply = self
            .chat
            .complete(ChatRequest {
                system: describe_system_prompt(language),
                user: build_describe_prompt(url, &digest),
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
            })
            .await
            .map_err(|err| {
                backlink_warn!("description request failed: {}", err);
                DescribeError::Llm
            })?;

        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_order_and_statuses() {
        assert_eq!(validate_describe_url(""), Err(DescribeError::MissingUrl));
        assert_eq!(validate_describe_url("ftp://a.b"), Err(DescribeError::InvalidUrl));
        assert_eq!(
            validate_describe_url("https://WWW.Instagram.com/acme"),
            Err(DescribeError::SocialMedia)
        );
        assert_eq!(validate_describe_url("https://acme.example"), Ok(()));
        assert_eq!(DescribeError::SocialMedia.status(), 400);
        assert_eq!(DescribeError::FetchTimeout("t".into()).status(), 500);
        assert_eq!(DescribeError::Llm.status(), 500);
    }

    #[test]
    fn fetch_failures_map_to_distinct_variants() {
        let rate = FetchError::new(FailureKind::RateLimited, "slow down");
        assert_eq!(
            DescribeError::from(rate),
            DescribeError::UpstreamRateLimited("slow down".to_string())
        );
        let status = FetchError::new(FailureKind::HttpStatus(502), "bad gateway");
        assert_eq!(
            DescribeError::from(status).to_string(),
            "bad gateway"
        );
    }
}
