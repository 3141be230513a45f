//! LLM provider implementations.
//!
//! Concrete [`LlmProvider`](solaudit_core::llm::provider::LlmProvider)
//! implementations plus a factory ([`create_provider`]) that builds the
//! configured one, and [`test_provider_connection`] for `solaudit check`.

pub mod anthropic;
pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;
use tracing::Instrument;

use solaudit_core::llm::box_provider::BoxLlmProvider;
use solaudit_types::config::ModelSettings;
use solaudit_types::llm::{CompletionRequest, LlmError, ProviderType};

use self::anthropic::AnthropicProvider;
use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config as oai_config;

/// Create a [`BoxLlmProvider`] from the `[model]` settings.
///
/// # Errors
///
/// `AuthenticationFailed` when no API key was resolved;
/// `InvalidRequest` when an OpenAI-compatible provider has neither a known
/// name nor a `base_url`.
pub fn create_provider(
    settings: &ModelSettings,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let timeout = Duration::from_secs(settings.timeout_secs);

    match settings.provider {
        ProviderType::Anthropic => {
            let mut provider = AnthropicProvider::new(key, settings.model.clone(), timeout)?;
            if let Some(base_url) = settings.base_url.as_deref() {
                provider = provider.with_base_url(base_url.to_string());
            }
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderType::OpenAiCompatible => {
            // An explicit base_url wins over the well-known defaults.
            let config = match settings.base_url.as_deref() {
                Some(base_url) => {
                    oai_config::custom(&settings.name, base_url, key, &settings.model, timeout)
                }
                None => oai_config::defaults_for(&settings.name, key, &settings.model, timeout)
                    .ok_or_else(|| {
                        LlmError::InvalidRequest(format!(
                            "unknown provider '{}' (known: {}); set model.base_url",
                            settings.name,
                            oai_config::KNOWN_PROVIDERS.join(", ")
                        ))
                    })?,
            };
            Ok(BoxLlmProvider::new(OpenAiCompatibleProvider::new(config)))
        }
    }
}

/// Test provider connectivity by sending a minimal completion request.
///
/// Sends a tiny "Hello" message with a minimal token budget and no output
/// schema.
pub async fn test_provider_connection(
    provider: &BoxLlmProvider,
    model: &str,
) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: model.to_string(),
        prompt: "Hello".to_string(),
        max_tokens: 10,
        temperature: Some(0.0),
        output_config: None,
    };

    let span = tracing::info_span!(
        "gen_ai.connection_check",
        gen_ai.operation.name = solaudit_observe::genai_attrs::OP_CONNECTION_CHECK,
        gen_ai.provider.name = provider.name(),
        gen_ai.request.model = model,
    );

    provider.complete(&request).instrument(span).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(provider: ProviderType, name: &str, base_url: Option<&str>) -> ModelSettings {
        ModelSettings {
            provider,
            name: name.to_string(),
            base_url: base_url.map(str::to_string),
            ..ModelSettings::default()
        }
    }

    fn key() -> Option<SecretString> {
        Some(SecretString::from("sk-test-key"))
    }

    #[test]
    fn test_create_provider_anthropic() {
        let mut s = settings(ProviderType::Anthropic, "anthropic", None);
        s.model = "claude-sonnet-4-20250514".to_string();
        let provider = create_provider(&s, key()).unwrap();
        assert_eq!(provider.name(), "anthropic");
        assert!(provider.capabilities().structured_output);
    }

    #[test]
    fn test_create_provider_openai_by_name() {
        let provider =
            create_provider(&settings(ProviderType::OpenAiCompatible, "openai", None), key())
                .unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_gemini_by_name() {
        let provider =
            create_provider(&settings(ProviderType::OpenAiCompatible, "gemini", None), key())
                .unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.capabilities().max_context_tokens, 1_000_000);
    }

    #[test]
    fn test_create_provider_with_base_url() {
        let provider = create_provider(
            &settings(
                ProviderType::OpenAiCompatible,
                "local-gateway",
                Some("http://localhost:11434/v1"),
            ),
            key(),
        )
        .unwrap();
        assert_eq!(provider.name(), "local-gateway");
    }

    #[test]
    fn test_create_provider_unknown_name_without_base_url() {
        let result = create_provider(&settings(ProviderType::OpenAiCompatible, "acme", None), key());
        match result {
            Err(LlmError::InvalidRequest(msg)) => assert!(msg.contains("acme")),
            Err(other) => panic!("Expected InvalidRequest, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }

    #[test]
    fn test_create_provider_missing_key() {
        let result = create_provider(&settings(ProviderType::Anthropic, "anthropic", None), None);
        match result {
            Err(LlmError::AuthenticationFailed) => {}
            Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }
}
