//! LLM request/response types.
//!
//! Provider-neutral shapes for completion requests, structured output
//! configuration, usage tracking, and provider errors. Concrete providers in
//! `solaudit-infra` translate these to their own wire formats.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-turn completion request: one user prompt, one reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Structured output constraint. `None` means free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_config: Option<OutputConfig>,
}

/// Structured output configuration (JSON-schema-constrained response).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// The output format block of an [`OutputConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFormat {
    /// Always `"json_schema"` for structured output.
    #[serde(rename = "type")]
    pub type_field: String,
    pub json_schema: OutputJsonSchema,
}

/// A named JSON schema the response must conform to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputJsonSchema {
    pub name: String,
    pub schema: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl OutputConfig {
    /// Build a strict `json_schema` output configuration.
    pub fn json_schema(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            format: OutputFormat {
                type_field: "json_schema".to_string(),
                json_schema: OutputJsonSchema {
                    name: name.into(),
                    schema,
                    strict: Some(true),
                },
            },
        }
    }
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Reason why the LLM stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    Refusal,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => write!(f, "end_turn"),
            StopReason::MaxTokens => write!(f, "max_tokens"),
            StopReason::StopSequence => write!(f, "stop_sequence"),
            StopReason::Refusal => write!(f, "refusal"),
        }
    }
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    /// The reply arrived but its content is not the requested shape.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("context length exceeded")]
    ContextLengthExceeded,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Capabilities of an LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCapabilities {
    pub structured_output: bool,
    pub max_context_tokens: u32,
    pub max_output_tokens: u32,
}

/// Type of LLM provider backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Anthropic,
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::Anthropic => write!(f, "anthropic"),
            ProviderType::OpenAiCompatible => write!(f, "openai_compatible"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_serde() {
        let reason = StopReason::MaxTokens;
        let json = serde_json::to_string(&reason).unwrap();
        assert_eq!(json, "\"max_tokens\"");
        let parsed: StopReason = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StopReason::MaxTokens);
    }

    #[test]
    fn test_provider_type_serde() {
        let pt = ProviderType::OpenAiCompatible;
        let json = serde_json::to_string(&pt).unwrap();
        assert_eq!(json, "\"openai_compatible\"");
        let parsed: ProviderType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ProviderType::OpenAiCompatible);
        assert_eq!(ProviderType::Anthropic.to_string(), "anthropic");
        assert!(serde_json::from_str::<ProviderType>("\"bedrock\"").is_err());
    }

    #[test]
    fn test_output_config_serializes_type_key() {
        let config = OutputConfig::json_schema("AuditSegment", serde_json::json!({"type": "object"}));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["format"]["type"], "json_schema");
        assert_eq!(json["format"]["json_schema"]["name"], "AuditSegment");
        assert_eq!(json["format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn test_request_skips_empty_options() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            prompt: "hi".to_string(),
            max_tokens: 16,
            temperature: None,
            output_config: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
        assert!(json.get("output_config").is_none());
        assert_eq!(json["prompt"], "hi");
    }

    #[test]
    fn test_llm_error_display() {
        assert_eq!(LlmError::Timeout(60).to_string(), "request timed out after 60s");
        assert_eq!(LlmError::AuthenticationFailed.to_string(), "authentication failed");
    }
}
