//! AuditModelClient trait -- the structured-completion port.
//!
//! The controller only knows that a prompt goes in and an `AuditSegment`
//! (or an error) comes out. Which provider performs the schema coercion is
//! an infrastructure concern; `LlmAuditClient` in solaudit-infra is the
//! production implementation.

use std::future::Future;

use solaudit_types::audit::AuditSegment;
use solaudit_types::error::AuditError;

/// Capability: turn a fully built prompt into a schema-conforming audit.
///
/// Implementations must not retry beyond their own configured schema-retry
/// policy and must never synthesize a segment on failure. Errors are
/// `ModelUnavailable` (network, provider, timeout) or `SchemaConformance`.
pub trait AuditModelClient: Send + Sync {
    /// The fixed model identifier used for every call.
    fn model(&self) -> &str;

    fn request_structured_audit(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<AuditSegment, AuditError>> + Send;
}
