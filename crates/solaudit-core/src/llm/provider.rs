//! LlmProvider trait definition.
//!
//! This is the core abstraction that all LLM backends implement. Uses
//! RPITIT for `complete`; `BoxLlmProvider` adds dynamic dispatch on top.

use solaudit_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

/// Trait for LLM provider backends (Anthropic, OpenAI-compatible).
///
/// Implementations live in solaudit-infra.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "anthropic", "openai").
    fn name(&self) -> &str;

    /// What this provider supports.
    fn capabilities(&self) -> &ProviderCapabilities;

    /// Send a completion request and receive the full response.
    ///
    /// When `request.output_config` is set the provider must ask its backend
    /// for schema-constrained output.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
