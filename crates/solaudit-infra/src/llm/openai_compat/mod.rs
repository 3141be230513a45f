//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenAI, Google Gemini,
//! Mistral, and any custom endpoint speaking the chat completions protocol.
//! Structured output is requested with `response_format: json_schema`.

pub mod config;

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, FinishReason,
    ResponseFormat, ResponseFormatJsonSchema,
};
use secrecy::ExposeSecret;

use solaudit_core::llm::provider::LlmProvider;
use solaudit_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use self::config::OpenAiCompatConfig;

/// Unified provider for any OpenAI-compatible API.
///
/// Does NOT derive Debug; the `async_openai::Client` holds the API key.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
    timeout: Duration,
    capabilities: ProviderCapabilities,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
            timeout: config.timeout,
            capabilities: config.capabilities,
        }
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(request.prompt.clone()),
                name: None,
            },
        )];

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        let response_format = request.output_config.as_ref().map(|oc| ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: oc.format.json_schema.name.clone(),
                schema: Some(oc.format.json_schema.schema.clone()),
                strict: oc.format.json_schema.strict,
            },
        });

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            response_format,
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(oai_request))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
            .map_err(map_openai_error)?;

        let choice = response.choices.first();

        let content = choice
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let refused = choice.is_some_and(|c| c.message.refusal.is_some());

        let stop_reason = if refused {
            StopReason::Refusal
        } else {
            choice
                .and_then(|c| c.finish_reason.as_ref())
                .map(|fr| match fr {
                    FinishReason::Stop => StopReason::EndTurn,
                    FinishReason::Length => StopReason::MaxTokens,
                    FinishReason::ContentFilter => StopReason::Refusal,
                    FinishReason::ToolCalls | FinishReason::FunctionCall => StopReason::EndTurn,
                })
                .unwrap_or(StopReason::EndTurn)
        };

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            stop_reason,
            usage,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "invalid_api_key"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited {
                    retry_after_ms: None,
                }
            } else if code == "context_length_exceeded"
                || api_err.message.contains("maximum context length")
            {
                LlmError::ContextLengthExceeded
            } else if code == "server_error" || error_type == "overloaded_error" {
                LlmError::Overloaded(api_err.message.clone())
            } else if error_type == "invalid_request_error" {
                LlmError::InvalidRequest(api_err.message.clone())
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited {
                retry_after_ms: None,
            },
            Some(529) => LlmError::Overloaded(err.to_string()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => LlmError::Provider {
            message: format!("malformed response envelope: {content}"),
        },
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}
