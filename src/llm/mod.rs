pub mod client;
pub mod http;
pub mod json;
pub mod provider;
pub mod response;
pub mod secrets;

pub use client::{ClientSettings, LlmClient};
pub use provider::ClientType;
pub use secrets::{ApiKey, ApiKeySource, ResolvedKey, resolve_api_key};
