//! Anthropic Claude LLM provider.
//!
//! [`AnthropicProvider`] implements
//! [`LlmProvider`](solaudit_core::llm::provider::LlmProvider) for the
//! non-streaming Anthropic Messages API with JSON-schema structured output.

pub mod client;
pub mod types;

pub use client::AnthropicProvider;
