//! Configuration types.
//!
//! `AppConfig` represents the top-level `config.toml`. Every field has a
//! default so an empty or missing file yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderType;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Settings for the audit model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Backend type.
    #[serde(default = "default_provider")]
    pub provider: ProviderType,
    /// Provider name. For OpenAI-compatible backends a well-known name
    /// ("openai", "gemini", "mistral") selects the base URL.
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Fixed model identifier used for every audit call.
    #[serde(default = "default_model")]
    pub model: String,
    /// Override the provider's base URL.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-call timeout. A timeout surfaces as a model-unavailable error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many extra attempts are made when the provider's output does not
    /// parse as an audit segment. Zero disables retries.
    #[serde(default = "default_schema_retries")]
    pub schema_retries: u32,
}

fn default_provider() -> ProviderType {
    ProviderType::OpenAiCompatible
}

fn default_provider_name() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f64 {
    0.1
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_schema_retries() -> u32 {
    1
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            name: default_provider_name(),
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            schema_retries: default_schema_retries(),
        }
    }
}

/// Settings for `solaudit serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sessions untouched for this long are dropped. Zero disables the sweep.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_session_idle_secs() -> u64 {
    3600
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.model.provider, ProviderType::OpenAiCompatible);
        assert_eq!(config.model.model, "gpt-4o-mini");
        assert_eq!(config.model.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.model.timeout_secs, 60);
        assert_eq!(config.model.schema_retries, 1);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.session_idle_secs, 3600);
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.model.name, "openai");
        assert!(config.model.base_url.is_none());
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
[model]
provider = "anthropic"
name = "anthropic"
model = "claude-sonnet-4-20250514"
api_key_env = "ANTHROPIC_API_KEY"
timeout_secs = 30
schema_retries = 0

[server]
port = 8080
session_idle_secs = 0
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.provider, ProviderType::Anthropic);
        assert_eq!(config.model.model, "claude-sonnet-4-20250514");
        assert_eq!(config.model.timeout_secs, 30);
        assert_eq!(config.model.schema_retries, 0);
        // Unset fields keep their defaults.
        assert_eq!(config.model.max_tokens, 2048);
        assert!((config.model.temperature - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.session_idle_secs, 0);
    }
}
