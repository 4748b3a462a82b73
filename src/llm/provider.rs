use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ClientType {
    #[value(name = "openai")]
    OpenAi,
    Together,
    #[value(alias = "anthropic")]
    Claude,
}

impl ClientType {
    pub const ALL: [ClientType; 3] = [ClientType::OpenAi, ClientType::Together, ClientType::Claude];

    pub fn name(self) -> &'static str {
        match self {
            ClientType::OpenAi => "openai",
            ClientType::Together => "together",
            ClientType::Claude => "claude",
        }
    }

    /// Environment variable holding this provider's key.
    pub fn env_var(self) -> &'static str {
        match self {
            ClientType::OpenAi => "OPENAI_API_KEY",
            ClientType::Together => "TOGETHER_API_KEY",
            ClientType::Claude => "ANTHROPIC_API_KEY",
        }
    }

    /// Field name looked up in the secrets file.
    pub fn secrets_field(self) -> &'static str {
        self.env_var()
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ClientType::OpenAi => "gpt-5-nano",
            ClientType::Together => "meta-llama/Llama-3.3-70B-Instruct-Turbo",
            ClientType::Claude => "claude-3-5-haiku-latest",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            ClientType::OpenAi => "https://api.openai.com/v1",
            ClientType::Together => "https://api.together.xyz/v1",
            ClientType::Claude => "https://api.anthropic.com",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClientType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ClientType::OpenAi),
            "together" => Ok(ClientType::Together),
            "claude" | "anthropic" => Ok(ClientType::Claude),
            other => bail!(
                "Unknown client type '{other}'. Expected one of: openai, together, claude"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_match_provider() {
        assert_eq!(ClientType::OpenAi.env_var(), "OPENAI_API_KEY");
        assert_eq!(ClientType::Together.env_var(), "TOGETHER_API_KEY");
        assert_eq!(ClientType::Claude.env_var(), "ANTHROPIC_API_KEY");
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("OpenAI".parse::<ClientType>().unwrap(), ClientType::OpenAi);
        assert_eq!(" together ".parse::<ClientType>().unwrap(), ClientType::Together);
        assert_eq!("anthropic".parse::<ClientType>().unwrap(), ClientType::Claude);
        assert!("mistral".parse::<ClientType>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for client in ClientType::ALL {
            assert_eq!(client.to_string().parse::<ClientType>().unwrap(), client);
        }
    }

    #[test]
    fn clap_accepts_anthropic_alias() {
        let parsed = <ClientType as ValueEnum>::from_str("anthropic", true).unwrap();
        assert_eq!(parsed, ClientType::Claude);
        let parsed = <ClientType as ValueEnum>::from_str("openai", true).unwrap();
        assert_eq!(parsed, ClientType::OpenAi);
    }
}
