//! JSON bodies of the `/generate` and `/describe` endpoints.
use backlink_core::{BatchRequest, ContentType, BATCH_SIZE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    pub url: String,
    pub keyword: String,
    pub brand: String,
    pub description: String,
    pub language: String,
    /// Kept raw: unknown types still generate (as forum content) and are
    /// echoed back unchanged.
    pub content_type: String,
    pub word_count: u32,
    pub batch_size: u32,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            url: String::new(),
            keyword: String::new(),
            brand: String::new(),
            description: String::new(),
            language: "Türkçe".to_string(),
            content_type: ContentType::default().as_str().to_string(),
            word_count: 100,
            batch_size: BATCH_SIZE,
        }
    }
}

impl GenerateRequest {
    /// Prompt flavour for the raw type; unknown types use the forum prompt.
    pub fn prompt_type(&self) -> ContentType {
        ContentType::from_wire(&self.content_type).unwrap_or(ContentType::Forum)
    }
}

impl From<&BatchRequest> for GenerateRequest {
    fn from(request: &BatchRequest) -> Self {
        Self {
            url: request.url.clone(),
            keyword: request.keyword.clone(),
            brand: request.brand.clone(),
            description: request.description.clone(),
            language: request.language.clone(),
            content_type: request.content_type.as_str().to_string(),
            word_count: request.word_count,
            batch_size: request.batch_size,
        }
    }
}

/// Successful generation: the items of one batch, already linked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateData {
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GenerateData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    pub fn ok(data: GenerateData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DescribeResponse {
    pub fn ok(description: impl Into<String>) -> Self {
        Self {
            success: true,
            description: Some(description.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            description: None,
            error: Some(error.into()),
        }
    }
}
