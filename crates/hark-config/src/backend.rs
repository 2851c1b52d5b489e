use secrecy::SecretString;
use serde::Deserialize;

/// Configuration for the speech-to-text backend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Backend type
    #[serde(rename = "type")]
    pub backend_type: BackendType,
    /// API key, omitted for unauthenticated self-hosted backends
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Supported backends
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    /// `OpenAI`-compatible Whisper inference server
    Whisper,
}
