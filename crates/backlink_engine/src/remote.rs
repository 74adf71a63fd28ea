use std::time::Duration;

use backlink_logging::backlink_debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    BatchGenerator, DescribeError, DescribeRequest, DescribeResponse, Describer, GenerateData,
    GenerateError, GenerateRequest, GenerateResponse,
};

/// Talks to a running backlink server instead of calling the model directly.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The servers answer failures with a JSON envelope and a 4xx/5xx status,
    /// so the body is decoded whatever the status.
    async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, String> {
        let url = format!("{}/{endpoint}", self.base_url);
        backlink_debug!("remote call url={}", url);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let status = response.status();
        let text = response.text().await.map_err(|err| err.to_string())?;
        serde_json::from_str(&text)
            .map_err(|err| format!("unexpected response from {url} (HTTP {status}): {err}"))
    }
}

#[async_trait::async_trait]
impl BatchGenerator for RemoteClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateData, GenerateError> {
        let response: GenerateResponse = self
            .post("generate", request)
            .await
            .map_err(GenerateError::Remote)?;
        match response {
            GenerateResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            GenerateResponse { error, .. } => Err(GenerateError::Rejected(
                error.unwrap_or_else(|| "server reported a failure".to_string()),
            )),
        }
    }
}

#[async_trait::async_trait]
impl Describer for RemoteClient {
    async fn describe(&self, url: &str, language: Option<&str>) -> Result<String, DescribeError> {
        let request = DescribeRequest {
            url: url.to_string(),
            language: language.map(str::to_string),
        };
        let response: DescribeResponse = self
            .post("describe", &request)
            .await
            .map_err(DescribeError::Remote)?;
        match response {
            DescribeResponse {
                success: true,
                description: Some(description),
                ..
            } => Ok(description),
            DescribeResponse { error, .. } => Err(DescribeError::Remote(
                error.unwrap_or_else(|| "server reported a failure".to_string()),
            )),
        }
    }
}
