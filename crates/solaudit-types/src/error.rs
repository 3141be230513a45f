use thiserror::Error;

use crate::llm::LlmError;

/// Errors surfaced by audit triggers.
///
/// Every variant is terminal for the current trigger only. None of them
/// change session state.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A required text input was empty or whitespace-only.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The model provider could not be reached or returned an error.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),

    /// The provider's output could not be coerced into an audit segment.
    #[error("model output does not match the audit schema: {0}")]
    SchemaConformance(String),

    /// Feedback or finalize was attempted with no audit under review.
    #[error("no audit is currently under review")]
    NoActiveAudit,
}

impl AuditError {
    /// Whether this is a user-correctable warning rather than a model failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, AuditError::InvalidInput(_) | AuditError::NoActiveAudit)
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AuditError::InvalidInput(_) => "VALIDATION_ERROR",
            AuditError::ModelUnavailable(_) => "MODEL_UNAVAILABLE",
            AuditError::SchemaConformance(_) => "SCHEMA_CONFORMANCE",
            AuditError::NoActiveAudit => "NO_ACTIVE_AUDIT",
        }
    }
}

impl From<LlmError> for AuditError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Deserialization(msg) => AuditError::SchemaConformance(msg),
            other => AuditError::ModelUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_error_display() {
        let err = AuditError::InvalidInput("function code is empty".to_string());
        assert_eq!(err.to_string(), "invalid input: function code is empty");
    }

    #[test]
    fn test_warning_classification() {
        assert!(AuditError::NoActiveAudit.is_warning());
        assert!(AuditError::InvalidInput("x".to_string()).is_warning());
        assert!(!AuditError::ModelUnavailable("x".to_string()).is_warning());
        assert!(!AuditError::SchemaConformance("x".to_string()).is_warning());
    }

    #[test]
    fn test_from_llm_error() {
        let err: AuditError = LlmError::Timeout(60).into();
        assert!(matches!(err, AuditError::ModelUnavailable(ref m) if m.contains("60s")));

        let err: AuditError = LlmError::Deserialization("bad json".to_string()).into();
        assert!(matches!(err, AuditError::SchemaConformance(_)));
        assert_eq!(err.code(), "SCHEMA_CONFORMANCE");
    }
}
