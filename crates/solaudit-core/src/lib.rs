//! Business logic for the Solidity audit assistant.
//!
//! Defines the "ports" that the infrastructure layer implements (the
//! `LlmProvider` and `AuditModelClient` traits) plus everything that is pure
//! logic: prompt building, session state transitions, and report rendering.
//! Depends only on `solaudit-types` -- never on `solaudit-infra` or any
//! network crate.

pub mod audit;
pub mod llm;
