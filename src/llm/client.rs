use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_openai::{Client, config::OpenAIConfig};
use log::debug;

use super::http::HttpBackend;
use super::provider::ClientType;
use super::response::request_single_text_response;
use super::secrets::ApiKey;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 5000;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Overrides the provider's API base URL.
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub max_output_tokens: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Clone)]
enum Backend {
    OpenAi(Client<OpenAIConfig>),
    Together(HttpBackend),
    Claude(HttpBackend),
}

/// A single-turn text completion client for one provider and model.
#[derive(Debug, Clone)]
pub struct LlmClient {
    client_type: ClientType,
    model: String,
    timeout: Duration,
    max_output_tokens: u32,
    backend: Backend,
}

impl LlmClient {
    pub fn new(
        api_key: ApiKey,
        model: Option<&str>,
        client_type: ClientType,
        settings: &ClientSettings,
    ) -> Result<Self> {
        let model = model
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(client_type.default_model())
            .to_string();
        let base_url = settings
            .base_url
            .as_deref()
            .unwrap_or(client_type.default_base_url());

        let backend = match client_type {
            ClientType::OpenAi => Backend::OpenAi(initialize_openai(&api_key, base_url)),
            ClientType::Together => {
                Backend::Together(HttpBackend::new(http_client(settings)?, base_url, api_key))
            }
            ClientType::Claude => {
                Backend::Claude(HttpBackend::new(http_client(settings)?, base_url, api_key))
            }
        };

        debug!("Initialized {client_type} client with model {model}");
        Ok(Self {
            client_type,
            model,
            timeout: settings.timeout,
            max_output_tokens: settings.max_output_tokens,
            backend,
        })
    }

    pub fn client_type(&self) -> ClientType {
        self.client_type
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let started = Instant::now();
        let model = self.model.as_str();
        let max_tokens = self.max_output_tokens;

        let text = match &self.backend {
            Backend::OpenAi(client) => tokio::time::timeout(
                self.timeout,
                request_single_text_response(client, model, max_tokens, system_prompt, user_prompt),
            )
            .await
            .with_context(|| format!("OpenAI request timed out after {:?}", self.timeout))??,
            Backend::Together(backend) => {
                backend
                    .chat_completion(model, max_tokens, system_prompt, user_prompt)
                    .await?
            }
            Backend::Claude(backend) => {
                backend
                    .messages(model, max_tokens, system_prompt, user_prompt)
                    .await?
            }
        };

        debug!(
            "{} ({}) answered in {} ms",
            self.client_type,
            self.model,
            started.elapsed().as_millis()
        );
        Ok(text)
    }
}

fn initialize_openai(api_key: &ApiKey, base_url: &str) -> Client<OpenAIConfig> {
    let config = OpenAIConfig::new()
        .with_api_key(api_key.expose())
        .with_api_base(base_url);

    Client::with_config(config)
}

fn http_client(settings: &ClientSettings) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(settings.timeout)
        .build()
        .context("Failed to build HTTP client")
}
