//! Configuration and per-provider defaults for OpenAI-compatible providers.
//!
//! Each well-known provider that speaks the OpenAI chat completions protocol
//! gets a factory returning an [`OpenAiCompatConfig`] with the right base URL
//! and capabilities.

use std::time::Duration;

use secrecy::SecretString;

use solaudit_types::llm::ProviderCapabilities;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-4o-mini").
    pub model: String,
    /// End-to-end bound on each completion call.
    pub timeout: Duration,
    pub capabilities: ProviderCapabilities,
}

/// Names with a built-in base URL.
pub const KNOWN_PROVIDERS: &[&str] = &["openai", "gemini", "mistral"];

/// Defaults for a well-known provider name, or `None` if the name is unknown.
pub fn defaults_for(
    name: &str,
    api_key: SecretString,
    model: &str,
    timeout: Duration,
) -> Option<OpenAiCompatConfig> {
    match name {
        "openai" => Some(openai_defaults(api_key, model, timeout)),
        "gemini" => Some(gemini_defaults(api_key, model, timeout)),
        "mistral" => Some(mistral_defaults(api_key, model, timeout)),
        _ => None,
    }
}

/// Configuration for a custom endpoint (local gateway, self-hosted model).
///
/// Capabilities are conservative since nothing is known about the backend.
pub fn custom(
    name: &str,
    base_url: &str,
    api_key: SecretString,
    model: &str,
    timeout: Duration,
) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: name.into(),
        base_url: base_url.into(),
        api_key,
        model: model.into(),
        timeout,
        capabilities: ProviderCapabilities {
            structured_output: true,
            max_context_tokens: 32_000,
            max_output_tokens: 4_096,
        },
    }
}

/// OpenAI. Base URL: `https://api.openai.com/v1`; 128K context, 16K output.
pub fn openai_defaults(api_key: SecretString, model: &str, timeout: Duration) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
        timeout,
        capabilities: ProviderCapabilities {
            structured_output: true,
            max_context_tokens: 128_000,
            max_output_tokens: 16_384,
        },
    }
}

/// Google Gemini (OpenAI-compatible beta endpoint).
///
/// Base URL: `https://generativelanguage.googleapis.com/v1beta/openai`
pub fn gemini_defaults(api_key: SecretString, model: &str, timeout: Duration) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "gemini".into(),
        base_url: "https://generativelanguage.googleapis.com/v1beta/openai".into(),
        api_key,
        model: model.into(),
        timeout,
        capabilities: ProviderCapabilities {
            structured_output: true,
            max_context_tokens: 1_000_000,
            max_output_tokens: 65_536,
        },
    }
}

/// Mistral AI. Base URL: `https://api.mistral.ai/v1`
pub fn mistral_defaults(api_key: SecretString, model: &str, timeout: Duration) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "mistral".into(),
        base_url: "https://api.mistral.ai/v1".into(),
        api_key,
        model: model.into(),
        timeout,
        capabilities: ProviderCapabilities {
            structured_output: true,
            max_context_tokens: 128_000,
            max_output_tokens: 32_768,
        },
    }
}
