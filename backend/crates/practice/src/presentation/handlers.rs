//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use std::sync::Arc;

use platform::client::extract_client_ip;

use crate::application::config::PracticeConfig;
use crate::application::{ApplyOperationUseCase, GetSessionUseCase};
use crate::domain::repository::{ExamCatalog, PracticeSessionRepository};
use crate::error::{PracticeError, PracticeResult};
use crate::presentation::dto::{SessionOperationRequest, SessionViewResponse};
use kernel::id::SessionId;

/// Shared state for practice handlers
#[derive(Clone)]
pub struct PracticeAppState<R, C>
where
    R: PracticeSessionRepository + Clone + Send + Sync + 'static,
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub catalog: Arc<C>,
    pub config: Arc<PracticeConfig>,
}

// ============================================================================
// Get Session
// ============================================================================

/// GET /api/practice/sessions/{session_id}
pub async fn get_session<R, C>(
    State(state): State<PracticeAppState<R, C>>,
    Path(session_id): Path<String>,
) -> PracticeResult<Json<SessionViewResponse>>
where
    R: PracticeSessionRepository + Clone + Send + Sync + 'static,
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    let session_id = parse_session_id(&session_id)?;

    let use_case = GetSessionUseCase::new(state.repo.clone(), state.catalog.clone());
    let snapshot = use_case.execute(session_id).await?;

    Ok(Json(SessionViewResponse::build(
        &snapshot.session,
        &snapshot.answer_key,
        state.config.correctness_rule,
    )))
}

// ============================================================================
// Apply Operation
// ============================================================================

/// PATCH /api/practice/sessions/{session_id}
pub async fn patch_session<R, C>(
    State(state): State<PracticeAppState<R, C>>,
    Path(session_id): Path<String>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    payload: Result<Json<SessionOperationRequest>, JsonRejection>,
) -> PracticeResult<Json<SessionViewResponse>>
where
    R: PracticeSessionRepository + Clone + Send + Sync + 'static,
    C: ExamCatalog + Clone + Send + Sync + 'static,
{
    let session_id = parse_session_id(&session_id)?;

    // Structural validation happens before any store access
    let Json(request) =
        payload.map_err(|rejection| PracticeError::InvalidPayload(rejection.body_text()))?;
    let operation = request.into_operation()?;

    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    tracing::info!(
        session_id = %session_id,
        operation = operation.tag(),
        client_ip = ?client_ip,
        "Practice session mutation"
    );

    let use_case = ApplyOperationUseCase::new(state.repo.clone(), state.catalog.clone());
    let snapshot = use_case.execute(session_id, operation).await?;

    Ok(Json(SessionViewResponse::build(
        &snapshot.session,
        &snapshot.answer_key,
        state.config.correctness_rule,
    )))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// The session identifier is opaque; one that cannot be parsed cannot
/// resolve to a stored session.
fn parse_session_id(raw: &str) -> PracticeResult<SessionId> {
    raw.parse().map_err(|_| PracticeError::SessionNotFound)
}
