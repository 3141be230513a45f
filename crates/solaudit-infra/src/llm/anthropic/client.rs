//! AnthropicProvider -- concrete [`LlmProvider`] implementation for Anthropic Claude.
//!
//! Sends requests to the Anthropic Messages API (`/v1/messages`). Structured
//! output is requested through `output_config` and the text blocks of the
//! response are concatenated into `CompletionResponse::content`.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use solaudit_core::llm::provider::LlmProvider;
use solaudit_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use super::types::{
    AnthropicContentBlock, AnthropicErrorResponse, AnthropicMessage, AnthropicOutputConfig,
    AnthropicRequest, AnthropicResponse,
};

/// Anthropic Claude LLM provider.
///
/// Does not derive `Debug`; the key only leaves its `SecretString` when the
/// request headers are built.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    timeout: Duration,
    capabilities: ProviderCapabilities,
}

impl AnthropicProvider {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";

    /// Create a new Anthropic provider.
    ///
    /// `timeout` bounds every request end to end.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        let capabilities = Self::capabilities_for_model(&model);

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
            timeout,
            capabilities,
        })
    }

    /// Override the base URL (proxies, gateways).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn capabilities_for_model(model: &str) -> ProviderCapabilities {
        let max_output_tokens = if model.contains("opus") {
            32_000
        } else if model.contains("sonnet") || model.contains("haiku") {
            8_192
        } else {
            4_096
        };

        ProviderCapabilities {
            structured_output: true,
            max_context_tokens: 200_000,
            max_output_tokens,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into an [`AnthropicRequest`].
    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        let messages = vec![AnthropicMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        }];

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        AnthropicRequest {
            model,
            max_tokens: request.max_tokens,
            messages,
            temperature: request.temperature,
            output_config: request.output_config.as_ref().map(AnthropicOutputConfig::from),
        }
    }

    fn map_transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.timeout.as_secs())
        } else {
            LlmError::Provider {
                message: format!("HTTP request failed: {err}"),
            }
        }
    }
}

/// Map a non-success status and its body to an [`LlmError`].
fn map_status_error(status: reqwest::StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<AnthropicErrorResponse>(body)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited {
            retry_after_ms: None,
        },
        529 => LlmError::Overloaded(message),
        400 if message.contains("prompt is too long") => LlmError::ContextLengthExceeded,
        400 => LlmError::InvalidRequest(message),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {message}"),
        },
    }
}

fn map_stop_reason(stop_reason: Option<&str>) -> StopReason {
    match stop_reason {
        Some("max_tokens") => StopReason::MaxTokens,
        Some("stop_sequence") => StopReason::StopSequence,
        Some("refusal") => StopReason::Refusal,
        _ => StopReason::EndTurn,
    }
}

impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_anthropic_request(request);
        let url = self.url("/v1/messages");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, &error_body));
        }

        let anthropic_resp: AnthropicResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout(self.timeout.as_secs())
            } else {
                LlmError::Provider {
                    message: format!("malformed response envelope: {e}"),
                }
            }
        })?;

        let content = anthropic_resp
            .content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                AnthropicContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(CompletionResponse {
            id: anthropic_resp.id,
            content,
            model: anthropic_resp.model,
            stop_reason: map_stop_reason(anthropic_resp.stop_reason.as_deref()),
            usage: Usage {
                input_tokens: anthropic_resp.usage.input_tokens,
                output_tokens: anthropic_resp.usage.output_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solaudit_types::llm::OutputConfig;

    fn make_provider() -> AnthropicProvider {
        AnthropicProvider::new(
            SecretString::from("test-key-not-real"),
            "claude-sonnet-4-20250514".to_string(),
            Duration::from_secs(60),
        )
        .unwrap()
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "anthropic");
    }

    #[test]
    fn test_capabilities_by_model() {
        let caps = make_provider().capabilities().clone();
        assert!(caps.structured_output);
        assert_eq!(caps.max_context_tokens, 200_000);
        assert_eq!(caps.max_output_tokens, 8_192);

        let opus = AnthropicProvider::new(
            SecretString::from("k"),
            "claude-opus-4-20250514".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(opus.capabilities().max_output_tokens, 32_000);
    }

    #[test]
    fn test_to_anthropic_request() {
        let provider = make_provider();
        let request = CompletionRequest {
            model: String::new(),
            prompt: "audit this".to_string(),
            max_tokens: 1024,
            temperature: Some(0.1),
            output_config: Some(OutputConfig::json_schema(
                "AuditSegment",
                serde_json::json!({"type": "object"}),
            )),
        };

        let req = provider.to_anthropic_request(&request);
        // Empty request model falls back to the configured one
        assert_eq!(req.model, "claude-sonnet-4-20250514");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
        assert_eq!(req.messages[0].content, "audit this");
        let output = req.output_config.unwrap();
        assert_eq!(output.format.type_field, "json_schema");
    }

    #[test]
    fn test_base_url_override() {
        let provider = make_provider().with_base_url("http://localhost:8080/".to_string());
        assert_eq!(provider.url("/v1/messages"), "http://localhost:8080/v1/messages");
    }

    #[test]
    fn test_map_status_error() {
        use reqwest::StatusCode;

        assert!(matches!(
            map_status_error(StatusCode::UNAUTHORIZED, ""),
            LlmError::AuthenticationFailed
        ));
        assert!(matches!(
            map_status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            LlmError::RateLimited { .. }
        ));

        let overloaded = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        match map_status_error(StatusCode::from_u16(529).unwrap(), overloaded) {
            LlmError::Overloaded(msg) => assert_eq!(msg, "Overloaded"),
            other => panic!("expected Overloaded, got {other}"),
        }

        let too_long = r#"{"type":"error","error":{"type":"invalid_request_error","message":"prompt is too long: 210000 tokens"}}"#;
        assert!(matches!(
            map_status_error(StatusCode::BAD_REQUEST, too_long),
            LlmError::ContextLengthExceeded
        ));

        assert!(matches!(
            map_status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            LlmError::Provider { .. }
        ));
    }

    #[test]
    fn test_map_stop_reason() {
        assert_eq!(map_stop_reason(Some("end_turn")), StopReason::EndTurn);
        assert_eq!(map_stop_reason(Some("max_tokens")), StopReason::MaxTokens);
        assert_eq!(map_stop_reason(Some("refusal")), StopReason::Refusal);
        assert_eq!(map_stop_reason(None), StopReason::EndTurn);
    }
}
