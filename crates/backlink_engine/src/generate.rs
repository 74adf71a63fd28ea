use std::sync::Arc;

use backlink_core::{content_type_label, split_generated_items};
use backlink_logging::{backlink_info, backlink_warn};

use crate::prompt::CONTENT_SYSTEM_PROMPT;
use crate::{build_content_prompt, ChatClient, ChatRequest, GenerateData, GenerateRequest, LlmError};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("generation failed: {0}")]
    Llm(#[from] LlmError),
    #[error("generation server unreachable: {0}")]
    Remote(String),
    /// The server answered with `success: false`; the message is its own.
    #[error("{0}")]
    Rejected(String),
}

/// Produces one batch of linked content items.
#[async_trait::async_trait]
pub trait BatchGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateData, GenerateError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 8000,
        }
    }
}

/// In-process generator: prompt the model, split the reply on `---`, link
/// the keyword in each piece.
#[derive(Clone)]
pub struct GenerateService {
    chat: Arc<dyn ChatClient>,
    settings: GenerateSettings,
}

impl GenerateService {
    pub fn new(chat: Arc<dyn ChatClient>, settings: GenerateSettings) -> Self {
        Self { chat, settings }
    }
}

#[async_trait::async_trait]
impl BatchGenerator for GenerateService {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateData, GenerateError> {
        backlink_info!(
            "generating batch keyword={} type={} size={}",
            request.keyword,
            request.content_type,
            request.batch_size
        );
        let reply = self
            .chat
            .complete(ChatRequest {
                system: CONTENT_SYSTEM_PROMPT.to_string(),
                user: build_content_prompt(request),
                temperature: self.settings.temperature,
                max_tokens: self.settings.max_tokens,
            })
            .await?;

        let items = split_generated_items(&reply, &request.keyword, &request.url);
        if items.len() != request.batch_size as usize {
            backlink_warn!(
                "model returned {} items, asked for {}",
                items.len(),
                request.batch_size
            );
        }

        Ok(GenerateData {
            content_type: request.content_type.clone(),
            title: content_type_label(&request.content_type).to_string(),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedChat {
        reply: String,
        seen: Mutex<Vec<ChatRequest>>,
    }

    #[async_trait::async_trait]
    impl ChatClient for ScriptedChat {
        async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    fn request(content_type: &str) -> GenerateRequest {
        GenerateRequest {
            url: "https://shop.example".to_string(),
            keyword: "boots".to_string(),
            content_type: content_type.to_string(),
            batch_size: 2,
            ..GenerateRequest::default()
        }
    }

    #[tokio::test]
    async fn reply_is_split_linked_and_labelled() {
        let chat = Arc::new(ScriptedChat {
            reply: "Great Boots here.\n---\n<a href=\"x\">boots</a> again\n---\n   ".to_string(),
            ..ScriptedChat::default()
        });
        let service = GenerateService::new(chat.clone(), GenerateSettings::default());

        let data = service.generate(&request("social")).await.unwrap();

        assert_eq!(data.content_type, "social");
        assert_eq!(data.title, "Social Media Posts");
        assert_eq!(
            data.items,
            vec![
                "Great <a href=\"https://shop.example\" target=\"_blank\" rel=\"dofollow\">Boots</a> here."
                    .to_string(),
                "<a href=\"x\">boots</a> again".to_string(),
            ]
        );

        let seen = chat.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].max_tokens, 8000);
        assert_eq!(seen[0].system, CONTENT_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn unknown_type_is_echoed_with_generic_title() {
        let chat = Arc::new(ScriptedChat {
            reply: "one".to_string(),
            ..ScriptedChat::default()
        });
        let service = GenerateService::new(chat, GenerateSettings::default());

        let data = service.generate(&request("podcast")).await.unwrap();

        assert_eq!(data.content_type, "podcast");
        assert_eq!(data.title, "Contents");
    }
}
