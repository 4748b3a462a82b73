//! Plain HTTP backends for providers that are not reached through `async-openai`.

use anyhow::{Context, Result, bail};
use log::trace;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::response::first_text;
use super::secrets::ApiKey;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl HttpBackend {
    pub fn new(http: reqwest::Client, base_url: &str, api_key: ApiKey) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// OpenAI-compatible `chat/completions` call, as served by Together.
    pub async fn chat_completion(
        &self,
        model: &str,
        max_tokens: u32,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let body = ChatCompletionRequest {
            model,
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens,
            temperature: 0.0,
        };
        let request = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&body);

        let response: ChatCompletionResponse = send_json(request, "together").await?;
        first_text(
            response
                .choices
                .into_iter()
                .filter_map(|choice| choice.message.content),
        )
    }

    /// Anthropic Messages API call.
    pub async fn messages(
        &self,
        model: &str,
        max_tokens: u32,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String> {
        let body = MessagesRequest {
            model,
            max_tokens,
            system: system_prompt,
            messages: vec![Message {
                role: "user",
                content: user_prompt,
            }],
            temperature: 0.0,
        };
        let request = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);

        let response: MessagesResponse = send_json(request, "claude").await?;
        first_text(
            response
                .content
                .into_iter()
                .filter(|block| block.kind == "text")
                .filter_map(|block| block.text),
        )
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder, provider: &str) -> Result<T> {
    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to get response from {provider}"))?;

    let status = response.status();
    trace!("{provider} responded with {status}");
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("{provider} request failed with status {status}: {}", body.trim());
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed to decode {provider} response"))
}
