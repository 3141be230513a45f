//! Review state machine.
//!
//! `AuditController` applies the four reviewer triggers to an explicitly
//! passed `SessionState`:
//!
//! | From      | Trigger         | Guard              | To        |
//! |-----------|-----------------|--------------------|-----------|
//! | any       | submit code     | code non-empty     | Reviewing |
//! | Reviewing | submit feedback | feedback non-empty | Reviewing |
//! | Reviewing | finalize        | audit present      | Idle      |
//! | any       | render          | --                 | unchanged |
//!
//! State is only written after the model call has succeeded, so a failed
//! trigger leaves the session exactly as it was.

use solaudit_types::audit::{AuditHistoryEntry, AuditSegment};
use solaudit_types::error::AuditError;
use solaudit_types::session::{SessionState, SessionView};

use super::client::AuditModelClient;
use super::prompt::{build_audit_prompt, build_feedback_prompt};
use super::state::SessionStateExt;

/// Drives reviewer triggers against a session's state.
///
/// Holds no session data itself; one controller serves any number of
/// independently owned sessions.
pub struct AuditController<C: AuditModelClient> {
    client: C,
}

impl<C: AuditModelClient> AuditController<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit code for a fresh audit.
    ///
    /// Blank code is rejected before the model is called. On success the code
    /// (trimmed) and the returned audit become the session's current review,
    /// replacing any unfinalized one.
    pub async fn submit_code(
        &self,
        state: &mut SessionState,
        function_code: &str,
    ) -> Result<AuditSegment, AuditError> {
        let prompt = build_audit_prompt(function_code)?;

        tracing::info!(
            model = self.client.model(),
            code_len = function_code.len(),
            "requesting initial audit"
        );
        let segment = self
            .client
            .request_structured_audit(&prompt)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "initial audit failed"))?;

        state.begin_review(function_code.trim().to_string(), segment.clone());
        Ok(segment)
    }

    /// Ask the model to revise the current audit using reviewer feedback.
    pub async fn submit_feedback(
        &self,
        state: &mut SessionState,
        feedback: &str,
    ) -> Result<AuditSegment, AuditError> {
        let current = state.current_audit.as_ref().ok_or(AuditError::NoActiveAudit)?;
        let prompt = build_feedback_prompt(&state.current_function_code, current, feedback)?;

        tracing::info!(
            model = self.client.model(),
            feedback_len = feedback.len(),
            "requesting audit revision"
        );
        let revised = self
            .client
            .request_structured_audit(&prompt)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "audit revision failed"))?;

        state.revise_audit(revised.clone());
        Ok(revised)
    }

    /// Freeze the current audit into the session history.
    pub fn finalize(&self, state: &mut SessionState) -> Result<AuditHistoryEntry, AuditError> {
        let entry = state.finalize_current().ok_or(AuditError::NoActiveAudit)?;
        tracing::info!(history_len = state.audit_history.len(), "audit finalized");
        Ok(entry)
    }

    /// Snapshot the session for display. Never mutates and never calls the model.
    pub fn render(&self, state: &SessionState) -> SessionView {
        state.view()
    }
}
