//! SessionState lifecycle logic.
//!
//! `SessionState` lives in `solaudit-types`; this module provides an
//! extension trait with the raw transitions. Guards and model calls live in
//! the controller; these methods only apply already-obtained values.

use solaudit_types::audit::{AuditHistoryEntry, AuditSegment};
use solaudit_types::session::{SessionPhase, SessionState, SessionView};

/// Extension trait for `SessionState` lifecycle management.
pub trait SessionStateExt {
    /// `Reviewing` when a current audit is present, otherwise `Idle`.
    fn phase(&self) -> SessionPhase;

    /// Set the code under review together with its first audit.
    fn begin_review(&mut self, function_code: String, audit: AuditSegment);

    /// Replace the current audit with a revision. Returns `false` (and does
    /// nothing) when there is no audit under review.
    fn revise_audit(&mut self, audit: AuditSegment) -> bool;

    /// Freeze the current audit into the history and return to `Idle`.
    ///
    /// Returns the appended entry, or `None` when there was nothing to
    /// finalize (in which case nothing changes).
    fn finalize_current(&mut self) -> Option<AuditHistoryEntry>;

    /// Snapshot of the state for rendering.
    fn view(&self) -> SessionView;
}

impl SessionStateExt for SessionState {
    fn phase(&self) -> SessionPhase {
        if self.current_audit.is_some() {
            SessionPhase::Reviewing
        } else {
            SessionPhase::Idle
        }
    }

    fn begin_review(&mut self, function_code: String, audit: AuditSegment) {
        self.current_function_code = function_code;
        self.current_audit = Some(audit);
    }

    fn revise_audit(&mut self, audit: AuditSegment) -> bool {
        match self.current_audit.as_mut() {
            Some(current) => {
                *current = audit;
                true
            }
            None => false,
        }
    }

    fn finalize_current(&mut self) -> Option<AuditHistoryEntry> {
        let audit = self.current_audit.take()?;
        let code = std::mem::take(&mut self.current_function_code);
        let entry = AuditHistoryEntry::from_segment(code, &audit);
        self.audit_history.push(entry.clone());
        Some(entry)
    }

    fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase(),
            current_function_code: self.current_function_code.clone(),
            current_audit: self.current_audit.clone(),
            audit_history: self.audit_history.clone(),
        }
    }
}
