//! REST API handlers for review sessions.
//!
//! A session is created empty (Idle) and then driven by the four triggers:
//! submit code, submit feedback, finalize, and render (`GET`). The report
//! endpoint renders the finalized history as Markdown.
//!
//! All endpoints use the standard `ApiResponse` envelope pattern.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use solaudit_core::audit::report::render_report;
use solaudit_core::audit::state::SessionStateExt;
use solaudit_types::audit::{AuditHistoryEntry, AuditSegment};
use solaudit_types::session::{SessionPhase, SessionView};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::{AppState, SessionHandle};

// ---------------------------------------------------------------------------
// Request / Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub phase: SessionPhase,
}

/// Request body for `POST /sessions/{id}/code`.
#[derive(Debug, Deserialize)]
pub struct SubmitCodeRequest {
    pub code: String,
}

/// Request body for `POST /sessions/{id}/feedback`.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub feedback: String,
}

/// The audit now under review.
#[derive(Debug, Serialize)]
pub struct AuditResponse {
    pub audit: AuditSegment,
    pub phase: SessionPhase,
}

#[derive(Debug, Serialize)]
pub struct FinalizeResponse {
    pub finalized: AuditHistoryEntry,
    pub history_len: usize,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub functions: usize,
    pub markdown: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteSessionResponse {
    pub deleted: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("'{raw}' is not a valid session id")))
}

fn lookup(state: &AppState, raw: &str) -> Result<SessionHandle, AppError> {
    let id = parse_session_id(raw)?;
    state
        .session(&id)
        .ok_or_else(|| AppError::SessionNotFound(raw.to_string()))
}

fn session_href(id: &str) -> String {
    format!("/api/v1/sessions/{id}")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions -- Open a new, empty review session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<ApiResponse<CreateSessionResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = state.open_session().to_string();
    tracing::info!(session_id = %session_id, "review session opened");

    let href = session_href(&session_id);
    let response = CreateSessionResponse {
        session_id,
        phase: SessionPhase::Idle,
    };

    Ok(
        ApiResponse::success(response, request_id, start.elapsed().as_millis() as u64)
            .with_link("self", &href)
            .with_link("code", &format!("{href}/code")),
    )
}

/// GET /api/v1/sessions/{id} -- Render the session.
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let handle = lookup(&state, &id)?;
    let view = {
        let session = handle.lock().await;
        state.controller.render(&session)
    };

    Ok(
        ApiResponse::success(view, request_id, start.elapsed().as_millis() as u64)
            .with_link("self", &session_href(&id))
            .with_link("report", &format!("{}/report", session_href(&id))),
    )
}

/// POST /api/v1/sessions/{id}/code -- Submit code for a fresh audit.
///
/// Replaces any unfinalized audit. On failure the session is unchanged.
pub async fn submit_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SubmitCodeRequest>,
) -> Result<ApiResponse<AuditResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let handle = lookup(&state, &id)?;
    let mut session = handle.lock().await;
    let audit = state.controller.submit_code(&mut session, &body.code).await?;

    let response = AuditResponse {
        audit,
        phase: session.phase(),
    };

    Ok(ApiResponse::success(
        response,
        request_id,
        start.elapsed().as_millis() as u64,
    ))
}

/// POST /api/v1/sessions/{id}/feedback -- Revise the current audit.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SubmitFeedbackRequest>,
) -> Result<ApiResponse<AuditResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let handle = lookup(&state, &id)?;
    let mut session = handle.lock().await;
    let audit = state
        .controller
        .submit_feedback(&mut session, &body.feedback)
        .await?;

    let response = AuditResponse {
        audit,
        phase: session.phase(),
    };

    Ok(ApiResponse::success(
        response,
        request_id,
        start.elapsed().as_millis() as u64,
    ))
}

/// POST /api/v1/sessions/{id}/finalize -- Append the current audit to history.
pub async fn finalize(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<FinalizeResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let handle = lookup(&state, &id)?;
    let mut session = handle.lock().await;
    let finalized = state.controller.finalize(&mut session)?;

    let response = FinalizeResponse {
        finalized,
        history_len: session.audit_history.len(),
    };

    Ok(
        ApiResponse::success(response, request_id, start.elapsed().as_millis() as u64)
            .with_link("report", &format!("{}/report", session_href(&id))),
    )
}

/// GET /api/v1/sessions/{id}/report -- Markdown report of finalized audits.
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ReportResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let handle = lookup(&state, &id)?;
    let response = {
        let session = handle.lock().await;
        ReportResponse {
            functions: session.audit_history.len(),
            markdown: render_report(&session.audit_history),
        }
    };

    Ok(ApiResponse::success(
        response,
        request_id,
        start.elapsed().as_millis() as u64,
    ))
}

/// DELETE /api/v1/sessions/{id} -- End a session and discard its state.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeleteSessionResponse>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session_id = parse_session_id(&id)?;
    if !state.close_session(&session_id) {
        return Err(AppError::SessionNotFound(id));
    }
    tracing::info!(session_id = %id, "review session closed");

    Ok(ApiResponse::success(
        DeleteSessionResponse { deleted: true },
        request_id,
        start.elapsed().as_millis() as u64,
    ))
}
