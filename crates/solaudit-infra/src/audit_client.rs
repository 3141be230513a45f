//! LLM-backed implementation of [`AuditModelClient`].
//!
//! `LlmAuditClient` sends each prompt as a single user message with a strict
//! `AuditSegment` JSON schema attached and parses the reply. Provider
//! failures are returned immediately as `ModelUnavailable`. Output that does
//! not parse is retried up to `schema_retries` extra times and then reported
//! as `SchemaConformance`.

use tracing::Instrument;

use solaudit_core::audit::client::AuditModelClient;
use solaudit_core::llm::box_provider::BoxLlmProvider;
use solaudit_observe::genai_attrs::{
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_ID, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS, OP_STRUCTURED_AUDIT,
};
use solaudit_types::audit::{AuditSegment, audit_segment_schema};
use solaudit_types::config::ModelSettings;
use solaudit_types::error::AuditError;
use solaudit_types::llm::{CompletionRequest, CompletionResponse, LlmError, OutputConfig, StopReason};

/// Schema name sent to the provider.
const SCHEMA_NAME: &str = "AuditSegment";

// ---------------------------------------------------------------------------
// LlmAuditClient
// ---------------------------------------------------------------------------

pub struct LlmAuditClient {
    provider: BoxLlmProvider,
    model: String,
    temperature: f64,
    max_tokens: u32,
    schema_retries: u32,
    output_config: OutputConfig,
}

impl LlmAuditClient {
    /// Build a client around `provider` using the `[model]` settings for the
    /// model id, sampling, and retry policy.
    pub fn new(provider: BoxLlmProvider, settings: &ModelSettings) -> Self {
        Self {
            provider,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            schema_retries: settings.schema_retries,
            output_config: OutputConfig::json_schema(SCHEMA_NAME, audit_segment_schema()),
        }
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    fn build_request(&self, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
            temperature: Some(self.temperature),
            output_config: Some(self.output_config.clone()),
        }
    }
}

impl AuditModelClient for LlmAuditClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn request_structured_audit(&self, prompt: &str) -> Result<AuditSegment, AuditError> {
        let request = self.build_request(prompt);
        let attempts = self.schema_retries.saturating_add(1);
        let mut last_error = LlmError::Deserialization("no attempt made".to_string());

        for attempt in 1..=attempts {
            let span = tracing::info_span!(
                "gen_ai.structured_audit",
                gen_ai.operation.name = OP_STRUCTURED_AUDIT,
                gen_ai.provider.name = self.provider.name(),
                gen_ai.request.model = %request.model,
                gen_ai.request.max_tokens = request.max_tokens,
                gen_ai.request.temperature = ?request.temperature,
                gen_ai.usage.input_tokens = tracing::field::Empty,
                gen_ai.usage.output_tokens = tracing::field::Empty,
                gen_ai.response.finish_reasons = tracing::field::Empty,
                gen_ai.response.id = tracing::field::Empty,
                attempt,
            );

            let response = self
                .provider
                .complete(&request)
                .instrument(span.clone())
                .await
                .map_err(AuditError::from)?;

            span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
            span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
            span.record(
                GEN_AI_RESPONSE_FINISH_REASONS,
                tracing::field::display(&response.stop_reason),
            );
            span.record(GEN_AI_RESPONSE_ID, response.id.as_str());

            match parse_segment(&response) {
                Ok(segment) => {
                    tracing::debug!(
                        attempt,
                        risks = segment.risks.len(),
                        suggestions = segment.suggestions.len(),
                        "structured audit parsed"
                    );
                    return Ok(segment);
                }
                Err(err) => {
                    tracing::warn!(attempt, attempts, error = %err, "audit output did not match schema");
                    last_error = err;
                }
            }
        }

        Err(AuditError::from(last_error))
    }
}

/// Coerce a completion into an [`AuditSegment`].
///
/// Accepts the JSON object bare or inside a Markdown code fence. Every
/// failure is `LlmError::Deserialization`.
fn parse_segment(response: &CompletionResponse) -> Result<AuditSegment, LlmError> {
    if response.stop_reason == StopReason::Refusal {
        return Err(LlmError::Deserialization(
            "model refused to produce an audit".to_string(),
        ));
    }

    let body = strip_code_fence(&response.content);
    serde_json::from_str::<AuditSegment>(body).map_err(|e| {
        let truncated = if response.stop_reason == StopReason::MaxTokens {
            " (output hit max_tokens)"
        } else {
            ""
        };
        LlmError::Deserialization(format!(
            "failed to parse AuditSegment: {e}{truncated}\nraw content: {}",
            response.content
        ))
    })
}

/// Remove a surrounding Markdown fence, multi-line or on a single line.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Info string ("json"), if any, directly follows the opening backticks.
    rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use solaudit_core::llm::provider::LlmProvider;
    use solaudit_types::llm::{LlmError, ProviderCapabilities, Usage};

    // -----------------------------------------------------------------------
    // MockLlmProvider
    // -----------------------------------------------------------------------

    #[derive(Default)]
    struct Script {
        responses: VecDeque<Result<CompletionResponse, LlmError>>,
        requests: Vec<CompletionRequest>,
    }

    struct MockLlmProvider {
        script: Arc<Mutex<Script>>,
        capabilities: ProviderCapabilities,
    }

    impl LlmProvider for MockLlmProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            let mut script = self.script.lock().unwrap();
            script.requests.push(request.clone());
            script.responses.pop_front().unwrap_or_else(|| {
                Err(LlmError::Provider {
                    message: "script exhausted".to_string(),
                })
            })
        }
    }

    fn text(content: &str) -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            id: "resp_1".to_string(),
            content: content.to_string(),
            model: "mock-model".to_string(),
            stop_reason: StopReason::EndTurn,
            usage: Usage {
                input_tokens: 100,
                output_tokens: 40,
            },
        })
    }

    fn client(
        responses: Vec<Result<CompletionResponse, LlmError>>,
        schema_retries: u32,
    ) -> (LlmAuditClient, Arc<Mutex<Script>>) {
        let script = Arc::new(Mutex::new(Script {
            responses: responses.into(),
            requests: Vec::new(),
        }));
        let provider = BoxLlmProvider::new(MockLlmProvider {
            script: Arc::clone(&script),
            capabilities: ProviderCapabilities {
                structured_output: true,
                max_context_tokens: 128_000,
                max_output_tokens: 4_096,
            },
        });
        let settings = ModelSettings {
            model: "mock-model".to_string(),
            schema_retries,
            ..ModelSettings::default()
        };
        (LlmAuditClient::new(provider, &settings), script)
    }

    const VALID: &str = r#"{"summary":"Withdraws funds","risks":["reentrancy"],"suggestions":["add checks-effects-interactions"]}"#;

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_valid_output_parses() {
        let (client, script) = client(vec![text(VALID)], 1);

        let segment = client.request_structured_audit("audit this").await.unwrap();
        assert_eq!(segment.summary, "Withdraws funds");
        assert_eq!(segment.risks, vec!["reentrancy".to_string()]);

        let script = script.lock().unwrap();
        assert_eq!(script.requests.len(), 1);
        let request = &script.requests[0];
        assert_eq!(request.model, "mock-model");
        assert_eq!(request.prompt, "audit this");

        let output = request.output_config.as_ref().unwrap();
        assert_eq!(output.format.type_field, "json_schema");
        assert_eq!(output.format.json_schema.name, "AuditSegment");
        assert_eq!(output.format.json_schema.strict, Some(true));
        assert_eq!(output.format.json_schema.schema["additionalProperties"], false);
    }

    #[tokio::test]
    async fn test_fenced_output_parses() {
        let fenced = format!("```json\n{VALID}\n```");
        let (client, _) = client(vec![text(&fenced)], 0);
        let segment = client.request_structured_audit("p").await.unwrap();
        assert_eq!(segment.suggestions, vec!["add checks-effects-interactions".to_string()]);
    }

    #[tokio::test]
    async fn test_single_line_fence_parses_without_retry() {
        let fenced = format!("```json {VALID} ```");
        let (client, script) = client(vec![text(&fenced)], 0);

        let segment = client.request_structured_audit("p").await.unwrap();
        assert_eq!(segment.summary, "Withdraws funds");
        assert_eq!(script.lock().unwrap().requests.len(), 1);
    }

    #[tokio::test]
    async fn test_schema_failure_is_retried() {
        let (client, script) = client(vec![text("not json"), text(VALID)], 1);

        let segment = client.request_structured_audit("p").await.unwrap();
        assert_eq!(segment.summary, "Withdraws funds");
        assert_eq!(script.lock().unwrap().requests.len(), 2);
    }

    #[tokio::test]
    async fn test_schema_failure_after_retries() {
        let (client, script) = client(
            vec![
                text(r#"{"summary":"s","suggestions":[]}"#),
                text(r#"{"summary":"s","suggestions":[]}"#),
            ],
            1,
        );

        let err = client.request_structured_audit("p").await.unwrap_err();
        match err {
            AuditError::SchemaConformance(msg) => assert!(msg.contains("risks")),
            other => panic!("expected SchemaConformance, got {other}"),
        }
        assert_eq!(script.lock().unwrap().requests.len(), 2);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_one_call() {
        let (client, script) = client(vec![text("{}"), text(VALID)], 0);

        let err = client.request_structured_audit("p").await.unwrap_err();
        assert!(matches!(err, AuditError::SchemaConformance(_)));
        assert_eq!(script.lock().unwrap().requests.len(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_is_not_retried() {
        let (client, script) = client(vec![Err(LlmError::Timeout(60)), text(VALID)], 3);

        let err = client.request_structured_audit("p").await.unwrap_err();
        assert!(matches!(err, AuditError::ModelUnavailable(ref m) if m.contains("timed out")));
        assert_eq!(script.lock().unwrap().requests.len(), 1);
    }

    #[tokio::test]
    async fn test_refusal_is_schema_failure() {
        let refusal = Ok(CompletionResponse {
            id: "resp_2".to_string(),
            content: String::new(),
            model: "mock-model".to_string(),
            stop_reason: StopReason::Refusal,
            usage: Usage::default(),
        });
        let (client, _) = client(vec![refusal], 0);

        let err = client.request_structured_audit("p").await.unwrap_err();
        assert!(matches!(err, AuditError::SchemaConformance(ref m) if m.contains("refused")));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```\n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json {\"a\":1} ```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_single_line_fence_is_valid_segment() {
        let body = strip_code_fence(
            "```json {\"summary\":\"s\",\"risks\":[],\"suggestions\":[]} ```",
        );
        let segment: AuditSegment = serde_json::from_str(body).unwrap();
        assert_eq!(segment.summary, "s");
        assert!(segment.risks.is_empty());
    }
}
