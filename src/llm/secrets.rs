use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::llm::provider::ClientType;
use crate::utils::trim_line;

pub const DEFAULT_SECRETS_FILE: &str = "secrets.json";

/// An API key whose value never shows up in debug or display output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw value, for request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Argument,
    Environment,
    SecretsFile,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Argument => "command-line argument",
            ApiKeySource::Environment => "environment variable",
            ApiKeySource::SecretsFile => "secrets file",
        }
    }
}

#[derive(Debug)]
pub struct ResolvedKey {
    pub api_key: ApiKey,
    pub source: ApiKeySource,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SecretsFile {
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

impl SecretsFile {
    /// Returns the field's value when it is a non-empty string.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .and_then(trim_line)
    }
}

pub fn system_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

pub fn resolve_api_key<F>(
    explicit: Option<&str>,
    client_type: ClientType,
    env_lookup: F,
    secrets_path: &Path,
) -> Result<ResolvedKey>
where
    F: Fn(&str) -> Option<String>,
{
    // 1. Explicit argument
    if let Some(key) = explicit.and_then(trim_line) {
        return Ok(found(key, ApiKeySource::Argument, client_type));
    }

    // 2. Environment variable
    let env_var = client_type.env_var();
    if let Some(value) = env_lookup(env_var)
        && let Some(key) = trim_line(&value)
    {
        return Ok(found(key, ApiKeySource::Environment, client_type));
    }

    // 3. Secrets file
    let secrets = read_secrets_file(secrets_path).with_context(|| {
        format!(
            "Error loading API key for {client_type} from {}. Provide --api_key or set {env_var}",
            secrets_path.display()
        )
    })?;
    let Some(secrets) = secrets else {
        return Err(anyhow!(
            "No API key found for {client_type}: {} does not exist. Provide --api_key or set {env_var}",
            secrets_path.display()
        ));
    };

    secrets
        .get(client_type.secrets_field())
        .map(|key| found(key, ApiKeySource::SecretsFile, client_type))
        .ok_or_else(|| {
            anyhow!(
                "No API key found for {client_type}. Provide --api_key, set {env_var}, or add {} to {}",
                client_type.secrets_field(),
                secrets_path.display()
            )
        })
}

fn found(key: &str, source: ApiKeySource, client_type: ClientType) -> ResolvedKey {
    debug!(
        "Using {client_type} API key from the {}",
        source.description()
    );
    ResolvedKey {
        api_key: ApiKey::new(key),
        source,
    }
}

pub fn read_secrets_file(path: &Path) -> Result<Option<SecretsFile>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(parse_secrets_contents(&contents, path)?)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read secrets file at {}", path.display()))
        }
    }
}

fn parse_secrets_contents(contents: &str, path: &Path) -> Result<SecretsFile> {
    if contents.trim().is_empty() {
        return Ok(SecretsFile::default());
    }

    serde_json::from_str(contents)
        .with_context(|| format!("Failed to parse secrets file at {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_secrets(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join(DEFAULT_SECRETS_FILE);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn explicit_key_wins() {
        let dir = tempdir().unwrap();
        let path = write_secrets(dir.path(), r#"{"OPENAI_API_KEY": "from-file"}"#);
        let env = |_: &str| Some("from-env".to_string());

        let resolved = resolve_api_key(Some("explicit"), ClientType::OpenAi, env, &path).unwrap();
        assert_eq!(resolved.api_key.expose(), "explicit");
        assert_eq!(resolved.source, ApiKeySource::Argument);
    }

    #[test]
    fn environment_beats_secrets_file() {
        let dir = tempdir().unwrap();
        let path = write_secrets(dir.path(), r#"{"TOGETHER_API_KEY": "from-file"}"#);
        let env = |name: &str| (name == "TOGETHER_API_KEY").then(|| "from-env".to_string());

        let resolved = resolve_api_key(None, ClientType::Together, env, &path).unwrap();
        assert_eq!(resolved.api_key.expose(), "from-env");
        assert_eq!(resolved.source, ApiKeySource::Environment);
    }

    #[test]
    fn environment_is_keyed_by_client_type() {
        let dir = tempdir().unwrap();
        let path = write_secrets(dir.path(), r#"{"ANTHROPIC_API_KEY": "claude-file"}"#);
        let env = |name: &str| (name == "OPENAI_API_KEY").then(|| "openai-env".to_string());

        let resolved = resolve_api_key(None, ClientType::Claude, env, &path).unwrap();
        assert_eq!(resolved.api_key.expose(), "claude-file");
        assert_eq!(resolved.source, ApiKeySource::SecretsFile);
    }

    #[test]
    fn blank_values_fall_through() {
        let dir = tempdir().unwrap();
        let path = write_secrets(dir.path(), r#"{"OPENAI_API_KEY": "file-key"}"#);
        let env = |_: &str| Some("   ".to_string());

        let resolved = resolve_api_key(Some(""), ClientType::OpenAi, env, &path).unwrap();
        assert_eq!(resolved.api_key.expose(), "file-key");
    }

    #[test]
    fn missing_everything_names_client() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SECRETS_FILE);

        let err = resolve_api_key(None, ClientType::Together, no_env, &path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("together"), "{message}");
        assert!(message.contains("TOGETHER_API_KEY"), "{message}");
    }

    #[test]
    fn missing_field_names_client() {
        let dir = tempdir().unwrap();
        let path = write_secrets(dir.path(), r#"{"OPENAI_API_KEY": "only-openai"}"#);

        let err = resolve_api_key(None, ClientType::Claude, no_env, &path).unwrap_err();
        assert!(err.to_string().starts_with("No API key found for claude"));
    }

    #[test]
    fn malformed_secrets_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = write_secrets(dir.path(), "{ not json");

        let err = resolve_api_key(None, ClientType::OpenAi, no_env, &path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("openai"), "{message}");
        assert!(message.contains("Failed to parse secrets file"), "{message}");
    }

    #[test]
    fn malformed_file_ignored_when_env_is_set() {
        let dir = tempdir().unwrap();
        let path = write_secrets(dir.path(), "{ not json");
        let env = |_: &str| Some("env-key".to_string());

        let resolved = resolve_api_key(None, ClientType::OpenAi, env, &path).unwrap();
        assert_eq!(resolved.api_key.expose(), "env-key");
    }

    #[test]
    fn non_string_fields_are_ignored() {
        let dir = tempdir().unwrap();
        let path = write_secrets(dir.path(), r#"{"OPENAI_API_KEY": 42, "OPENAI_API_KEY_SR": "sr"}"#);
        let secrets = read_secrets_file(&path).unwrap().unwrap();
        assert_eq!(secrets.get("OPENAI_API_KEY"), None);
        assert_eq!(secrets.get("OPENAI_API_KEY_SR"), Some("sr"));
    }

    #[test]
    fn parse_secrets_contents_handles_empty() {
        let secrets = parse_secrets_contents("  \n", Path::new("secrets.json")).unwrap();
        assert_eq!(secrets.get("OPENAI_API_KEY"), None);
    }

    #[test]
    fn file_doesnt_exist() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("secrets.json");
        assert!(read_secrets_file(&path).unwrap().is_none());
    }

    #[test]
    fn api_key_is_redacted() {
        let key = ApiKey::new("sk-very-secret");
        assert!(!format!("{key:?}").contains("secret"));
        assert!(!key.to_string().contains("secret"));
    }

    proptest! {
        #[test]
        fn highest_available_tier_wins(
            explicit in proptest::option::of("[a-z]{1,8}"),
            from_env in proptest::option::of("[a-z]{1,8}"),
            from_file in proptest::option::of("[a-z]{1,8}"),
        ) {
            let dir = tempdir().unwrap();
            let path = dir.path().join(DEFAULT_SECRETS_FILE);
            if let Some(value) = &from_file {
                let mut fields = HashMap::new();
                fields.insert("OPENAI_API_KEY", value.clone());
                fs::write(&path, serde_json::to_string(&fields).unwrap()).unwrap();
            }
            let env_value = from_env.clone();
            let env = move |_: &str| env_value.clone();

            let result = resolve_api_key(explicit.as_deref(), ClientType::OpenAi, env, &path);
            let expected = explicit.or(from_env).or(from_file);
            match expected {
                Some(value) => {
                    let resolved = result.unwrap();
                    prop_assert_eq!(resolved.api_key.expose(), value.as_str());
                }
                None => prop_assert!(result.is_err()),
            }
        }
    }
}
