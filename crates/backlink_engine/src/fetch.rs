use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use backlink_logging::{backlink_debug, backlink_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Whole-request budget; the describe flow gives up after this.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "tr-TR,tr;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self, redirect_counter: Arc<AtomicUsize>) -> Result<reqwest::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count > redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn status_error(&self, status: StatusCode) -> FetchError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => FetchError::new(
                FailureKind::RateLimited,
                "The site blocked the request for sending too many requests. \
                 Wait a few minutes and try again, or enter the description manually.",
            ),
            StatusCode::FORBIDDEN => FetchError::new(
                FailureKind::Forbidden,
                "The site denied access and may not allow automated analysis. \
                 Enter the description manually.",
            ),
            other => FetchError::new(
                FailureKind::HttpStatus(other.as_u16()),
                format!(
                    "Site returned an error (HTTP {}). Enter the description manually.",
                    other.as_u16()
                ),
            ),
        }
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            return FetchError::new(
                FailureKind::Timeout,
                format!(
                    "Connection timed out ({} seconds). The site may not be responding.",
                    self.settings.request_timeout.as_secs()
                ),
            );
        }
        if err.is_redirect() {
            return FetchError::new(
                FailureKind::RedirectLimitExceeded,
                format!("Site access error: {err}"),
            );
        }
        FetchError::new(FailureKind::Network, format!("Site access error: {err}"))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = url::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("Invalid URL: {err}")))?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        backlink_debug!("fetching page url={}", parsed);
        let response = client
            .get(parsed.as_str())
            .header(USER_AGENT, &self.settings.user_agent)
            .header(ACCEPT, &self.settings.accept)
            .header(ACCEPT_LANGUAGE, &self.settings.accept_language)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|err| self.map_reqwest_error(err))?;

        let status = response.status();
        if !status.is_success() {
            backlink_warn!("fetch failed url={} status={}", url, status);
            return Err(self.status_error(status));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| self.map_reqwest_error(err))?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count: redirect_counter.load(Ordering::Relaxed),
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        format!("Site response is too large (over {max_bytes} bytes)."),
    )
}
