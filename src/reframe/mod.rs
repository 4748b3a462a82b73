//! The `Reframe` client: LLM-backed classification, analysis and rewriting of text.

pub mod drug;
pub mod emotion;
pub mod rewrite;
pub mod stigma;
pub mod style;
pub mod types;

use anyhow::{Result, bail};

use crate::llm::{ApiKey, ClientSettings, ClientType, LlmClient};

pub use types::{
    DrugClassification, EmotionDetection, StigmaAnalysis, StigmaCategory, StyleProfile,
};

#[derive(Debug, Clone)]
pub struct Reframe {
    client: LlmClient,
}

impl Reframe {
    /// Builds a client for `client_type`, using its default model when `model` is `None`.
    pub fn new(
        api_key: ApiKey,
        model: Option<&str>,
        client_type: ClientType,
        settings: &ClientSettings,
    ) -> Result<Self> {
        let client = LlmClient::new(api_key, model, client_type, settings)?;
        Ok(Self { client })
    }

    pub fn with_client(client: LlmClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &LlmClient {
        &self.client
    }

    pub async fn classify_drug_content(&self, text: &str) -> Result<DrugClassification> {
        ensure_text(text, "classify")?;
        drug::classify_drug_content(&self.client, text).await
    }

    pub async fn analyze_stigma(&self, text: &str) -> Result<StigmaAnalysis> {
        ensure_text(text, "analyze")?;
        stigma::analyze_stigma(&self.client, text).await
    }

    pub async fn retrieve_style_instruction(&self, text: &str) -> Result<StyleProfile> {
        ensure_text(text, "analyze the style of")?;
        style::retrieve_style_instruction(&self.client, text).await
    }

    pub async fn rewrite_text(
        &self,
        text: &str,
        explanation: &str,
        style: &StyleProfile,
    ) -> Result<String> {
        ensure_text(text, "rewrite")?;
        rewrite::rewrite_text(&self.client, text, explanation, style).await
    }

    pub async fn detect_emotion(&self, text: &str) -> Result<EmotionDetection> {
        ensure_text(text, "detect emotion in")?;
        emotion::detect_emotion(&self.client, text).await
    }
}

fn ensure_text(text: &str, action: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Cannot {action} empty text");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_text_is_rejected_before_any_request() {
        // Nothing listens here, so a request would fail with a connection error.
        let settings = ClientSettings {
            base_url: Some("http://127.0.0.1:9".to_string()),
            ..ClientSettings::default()
        };
        let reframe = Reframe::new(ApiKey::new("key"), None, ClientType::Together, &settings)
            .unwrap();

        let err = reframe.classify_drug_content("   ").await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot classify empty text");

        let err = reframe
            .rewrite_text("", "Labeling: x", &StyleProfile::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot rewrite empty text");
    }
}
