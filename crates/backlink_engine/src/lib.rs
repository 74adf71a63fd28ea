//! Backlink engine: network IO, text extraction and effect execution.
mod decode;
mod describe;
mod digest;
mod export;
mod extract;
mod fetch;
mod generate;
mod llm;
mod persist;
mod prompt;
mod remote;
mod runner;
mod types;
mod wire;

pub use decode::{decode_page, DecodedPage};
pub use describe::{
    is_social_media_url, validate_describe_url, DescribeError, DescribeService, DescribeSettings,
    Describer, PageDigester, SOCIAL_MEDIA_DOMAINS,
};
pub use digest::{compose_digest, DigestSettings};
pub use export::{
    export_filename, render_grouped_document, render_plain_text, write_export, ExportError,
    ExportFormat,
};
pub use extract::{HtmlToTextExtractor, PageText, RegexTextExtractor, ScraperTextExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use generate::{BatchGenerator, GenerateError, GenerateService, GenerateSettings};
pub use llm::{
    ChatClient, ChatRequest, ChatSettings, DeepSeekClient, LlmError, DEFAULT_API_URL, DEFAULT_MODEL,
};
pub use persist::{ExportDir, PersistError};
pub use prompt::{build_content_prompt, build_describe_prompt, target_language};
pub use remote::RemoteClient;
pub use runner::{ProgressSink, RunDriver, RunEvent};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput};
pub use wire::{DescribeRequest, DescribeResponse, GenerateData, GenerateRequest, GenerateResponse};
