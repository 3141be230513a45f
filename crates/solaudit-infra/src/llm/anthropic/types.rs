//! Anthropic Messages API types.
//!
//! Anthropic-specific request/response structures for HTTP communication.
//! They are NOT the provider-neutral types from solaudit-types.

use serde::{Deserialize, Serialize};

use solaudit_types::llm::OutputConfig;

/// Request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Constrains the response to a JSON schema. Skipped when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_config: Option<AnthropicOutputConfig>,
}

/// A single message in an Anthropic conversation.
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

/// `output_config` block: `{"format": {"type": "json_schema", "schema": {...}}}`.
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicOutputConfig {
    pub format: AnthropicOutputFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnthropicOutputFormat {
    #[serde(rename = "type")]
    pub type_field: String,
    pub schema: serde_json::Value,
}

impl From<&OutputConfig> for AnthropicOutputConfig {
    fn from(config: &OutputConfig) -> Self {
        Self {
            format: AnthropicOutputFormat {
                type_field: config.format.type_field.clone(),
                schema: config.format.json_schema.schema.clone(),
            },
        }
    }
}

/// A content block in an Anthropic response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum AnthropicContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Token usage from Anthropic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnthropicUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Error body: `{"type": "error", "error": {"type": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicErrorResponse {
    pub error: AnthropicError,
}

/// An error from the Anthropic API.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

/// Non-streaming response from the Anthropic Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicResponse {
    pub id: String,
    pub content: Vec<AnthropicContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: AnthropicUsage,
}
