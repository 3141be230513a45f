//! Per-session review state.
//!
//! `SessionState` is a plain record owned by exactly one session. Lifecycle
//! logic lives in `solaudit-core` as an extension trait.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audit::{AuditHistoryEntry, AuditSegment};

/// Mutable state of one reviewer session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Code currently under review. Empty when nothing is under review.
    pub current_function_code: String,
    /// The unfinalized audit for `current_function_code`.
    pub current_audit: Option<AuditSegment>,
    /// Finalized audits in finalization order. Append-only.
    pub audit_history: Vec<AuditHistoryEntry>,
}

/// Which state of the review machine a session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No current audit.
    Idle,
    /// A current audit is present and can be refined or finalized.
    Reviewing,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::Reviewing => write!(f, "reviewing"),
        }
    }
}

/// Read-only snapshot of a session, produced by the render trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub current_function_code: String,
    pub current_audit: Option<AuditSegment>,
    pub audit_history: Vec<AuditHistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_empty() {
        let state = SessionState::default();
        assert!(state.current_function_code.is_empty());
        assert!(state.current_audit.is_none());
        assert!(state.audit_history.is_empty());
    }

    #[test]
    fn test_phase_serde() {
        let json = serde_json::to_string(&SessionPhase::Reviewing).unwrap();
        assert_eq!(json, "\"reviewing\"");
        assert_eq!(SessionPhase::Idle.to_string(), "idle");
    }
}
