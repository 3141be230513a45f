//! Infrastructure layer for solaudit.
//!
//! Contains the concrete implementations of the ports defined in
//! `solaudit-core`: the Anthropic and OpenAI-compatible LLM providers, the
//! `LlmAuditClient` that turns a provider into a structured audit client,
//! plus config loading, data-directory resolution and API key lookup.

pub mod audit_client;
pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
