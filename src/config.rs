use anyhow::{Context, Result};

use crate::llm::{ApiKey, ClientSettings, ClientType};
use crate::reframe::Reframe;
use crate::utils::trim_line;

pub const API_KEY_ENV: &str = "REFRAME_API_KEY";
pub const MODEL_ENV: &str = "REFRAME_MODEL";
pub const CLIENT_TYPE_ENV: &str = "REFRAME_CLIENT_TYPE";

/// Everything a test routine needs to build its client.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api_key: ApiKey,
    pub model: Option<String>,
    pub client_type: ClientType,
    pub settings: ClientSettings,
}

impl RunConfig {
    pub fn new(api_key: ApiKey, model: Option<String>, client_type: ClientType) -> Self {
        Self {
            api_key,
            model: model.filter(|name| trim_line(name).is_some()),
            client_type,
            settings: ClientSettings::default(),
        }
    }

    /// Model name for banners; `default` when none was given.
    pub fn model_label(&self) -> &str {
        self.model.as_deref().unwrap_or("default")
    }

    pub fn reframe(&self) -> Result<Reframe> {
        Reframe::new(
            self.api_key.clone(),
            self.model.as_deref(),
            self.client_type,
            &self.settings,
        )
    }

    /// Reads the configuration handed to `cargo test` by the delegated runner.
    ///
    /// Returns `None` when no API key was handed over.
    pub fn from_harness_env<F>(env_lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(api_key) = env_lookup(API_KEY_ENV).filter(|key| trim_line(key).is_some()) else {
            return Ok(None);
        };
        let client_type = match env_lookup(CLIENT_TYPE_ENV) {
            Some(name) if trim_line(&name).is_some() => name
                .parse::<ClientType>()
                .with_context(|| format!("Invalid {CLIENT_TYPE_ENV}"))?,
            _ => ClientType::OpenAi,
        };

        Ok(Some(Self::new(
            ApiKey::new(api_key.trim()),
            env_lookup(MODEL_ENV),
            client_type,
        )))
    }
}
