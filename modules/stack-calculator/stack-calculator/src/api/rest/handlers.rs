//! REST handlers for the stack calculator module
//!
//! Handlers talk to the service through `StackCalculatorClientV1`, so the
//! REST surface and in-process consumers share one contract.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{Extension, Path};
use axum::http::{StatusCode, Uri};
use stack_calculator_sdk::{SessionId, StackCalculatorClientV1, StackCalculatorError};

use crate::domain::Service;

use super::dto::{
    CreateSessionResponse, DelayPopRequest, HealthResponse, IsEmptyResponse, PushRequest,
    ReduceRequest, ValueResponse,
};
use super::error::{Problem, error_to_problem};

type Client = Arc<dyn StackCalculatorClientV1>;

fn problem(uri: &Uri) -> impl FnOnce(StackCalculatorError) -> Problem + '_ {
    move |e| error_to_problem(&e, uri.path())
}

/// Handler for POST /stack-calculator/v1/sessions
pub async fn create_session(
    Extension(client): Extension<Client>,
    uri: Uri,
) -> Result<(StatusCode, Json<CreateSessionResponse>), Problem> {
    let session_id = client.create_session().await.map_err(problem(&uri))?;
    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id }),
    ))
}

/// Handler for POST /stack-calculator/v1/sessions/{session_id}/push
pub async fn push(
    Extension(client): Extension<Client>,
    Path(session_id): Path<SessionId>,
    uri: Uri,
    Json(req): Json<PushRequest>,
) -> Result<StatusCode, Problem> {
    client
        .push(&session_id, req.value)
        .await
        .map_err(problem(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /stack-calculator/v1/sessions/{session_id}/pop
pub async fn pop(
    Extension(client): Extension<Client>,
    Path(session_id): Path<SessionId>,
    uri: Uri,
) -> Result<Json<ValueResponse>, Problem> {
    let value = client.pop(&session_id).await.map_err(problem(&uri))?;
    Ok(Json(ValueResponse { value }))
}

/// Handler for GET /stack-calculator/v1/sessions/{session_id}/is-empty
pub async fn is_empty(
    Extension(client): Extension<Client>,
    Path(session_id): Path<SessionId>,
    uri: Uri,
) -> Result<Json<IsEmptyResponse>, Problem> {
    let is_empty = client.is_empty(&session_id).await.map_err(problem(&uri))?;
    Ok(Json(IsEmptyResponse { is_empty }))
}

/// Handler for POST /stack-calculator/v1/sessions/{session_id}/delay-pop
///
/// Holds the HTTP request open for the delay; other requests are unaffected.
pub async fn delay_pop(
    Extension(client): Extension<Client>,
    Path(session_id): Path<SessionId>,
    uri: Uri,
    Json(req): Json<DelayPopRequest>,
) -> Result<Json<ValueResponse>, Problem> {
    let value = client
        .delay_pop(&session_id, Duration::from_millis(req.delay_millis))
        .await
        .map_err(problem(&uri))?;
    Ok(Json(ValueResponse { value }))
}

/// Handler for POST /stack-calculator/v1/sessions/{session_id}/reduce
pub async fn reduce(
    Extension(client): Extension<Client>,
    Path(session_id): Path<SessionId>,
    uri: Uri,
    Json(req): Json<ReduceRequest>,
) -> Result<StatusCode, Problem> {
    client
        .reduce(&session_id, &req.operator)
        .await
        .map_err(problem(&uri))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /health
pub async fn health(Extension(service): Extension<Arc<Service>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        sessions: service.session_count(),
    })
}
