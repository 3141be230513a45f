//! Shared domain types for the Solidity audit assistant.
//!
//! Contains the audit value objects (`AuditSegment`, `AuditHistoryEntry`),
//! the per-session state record, provider-neutral LLM request/response
//! shapes, configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, schemars, thiserror.

pub mod audit;
pub mod config;
pub mod error;
pub mod llm;
pub mod session;
