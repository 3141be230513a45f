//! BoxLlmProvider -- object-safe dynamic dispatch wrapper for LlmProvider.
//!
//! 1. Define an object-safe `LlmProviderDyn` trait with boxed futures
//! 2. Blanket-impl `LlmProviderDyn` for all `T: LlmProvider`
//! 3. `BoxLlmProvider` wraps `Box<dyn LlmProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use solaudit_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

use super::provider::LlmProvider;

/// Object-safe version of [`LlmProvider`] with boxed futures.
pub trait LlmProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> &ProviderCapabilities;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;
}

impl<T: LlmProvider> LlmProviderDyn for T {
    fn name(&self) -> &str {
        LlmProvider::name(self)
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        LlmProvider::capabilities(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased LLM provider for runtime provider selection.
///
/// Since `LlmProvider` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxLlmProvider` exposes the same methods and delegates to the
/// inner `LlmProviderDyn` trait object.
pub struct BoxLlmProvider {
    inner: Box<dyn LlmProviderDyn + Send + Sync>,
}

impl BoxLlmProvider {
    /// Wrap a concrete `LlmProvider` in a type-erased box.
    pub fn new<T: LlmProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn capabilities(&self) -> &ProviderCapabilities {
        self.inner.capabilities()
    }

    /// Send a completion request and receive the full response.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_boxed(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solaudit_types::llm::{StopReason, Usage};

    struct EchoProvider {
        capabilities: ProviderCapabilities,
    }

    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn capabilities(&self) -> &ProviderCapabilities {
            &self.capabilities
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                id: "echo-1".to_string(),
                content: request.prompt.clone(),
                model: request.model.clone(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    #[tokio::test]
    async fn test_box_provider_delegates() {
        let provider = BoxLlmProvider::new(EchoProvider {
            capabilities: ProviderCapabilities {
                structured_output: true,
                max_context_tokens: 1000,
                max_output_tokens: 100,
            },
        });
        assert_eq!(provider.name(), "echo");
        assert!(provider.capabilities().structured_output);

        let request = CompletionRequest {
            model: "m".to_string(),
            prompt: "ping".to_string(),
            max_tokens: 10,
            temperature: None,
            output_config: None,
        };
        let response = provider.complete(&request).await.unwrap();
        assert_eq!(response.content, "ping");
        assert_eq!(response.model, "m");
    }
}
