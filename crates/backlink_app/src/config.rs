use anyhow::{Context, Result};
use backlink_engine::{ChatSettings, DEFAULT_API_URL, DEFAULT_MODEL};
use backlink_logging::backlink_info;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Settings read from the environment. Only the API key is a secret; the
/// rest have working defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_summary();
        Ok(config)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("BACKLINK_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("BACKLINK_PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key: var("DEEPSEEK_API_KEY"),
            api_url: var("DEEPSEEK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: var("DEEPSEEK_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            host: var("BACKLINK_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// Chat settings for commands that call the model in process.
    pub fn chat_settings(&self) -> Result<ChatSettings> {
        let api_key = self
            .api_key
            .clone()
            .context("DEEPSEEK_API_KEY must be set to call the language model")?;
        Ok(ChatSettings {
            api_url: self.api_url.clone(),
            model: self.model.clone(),
            ..ChatSettings::new(api_key)
        })
    }

    fn log_summary(&self) {
        let key = match &self.api_key {
            Some(key) => format!("<set, {} chars>", key.len()),
            None => "<not set>".to_string(),
        };
        backlink_info!(
            "config: api_url={} model={} api_key={} listen={}:{}",
            self.api_url,
            self.model,
            key,
            self.host,
            self.port
        );
    }
}
