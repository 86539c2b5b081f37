//! Study session endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/decks/:id/study
pub async fn start(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
) -> Result<Json<StartStudyResponse>> {
    let user_id = auth.user.id;
    let started = state
        .sessions
        .start(state.db.as_ref(), user_id, deck_id)
        .await?;

    if let Err(e) = state
        .db
        .record_study_session(started.session_id, user_id, started.deck.id)
        .await
    {
        if let Err(cleanup) = state.sessions.end(user_id, started.session_id).await {
            tracing::warn!(session_id = %started.session_id, "Could not discard unrecorded study session: {}", cleanup);
        }
        return Err(e);
    }

    Ok(Json(StartStudyResponse {
        session_id: started.session_id,
        deck: started.deck,
        view: started.view,
    }))
}

/// GET /api/study/:session_id
pub async fn view(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StudySessionResponse>> {
    let view = state.sessions.view(auth.user.id, session_id).await?;
    Ok(Json(StudySessionResponse { session_id, view }))
}

/// POST /api/study/:session_id/command
pub async fn command(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<StudyCommandRequest>,
) -> Result<Json<StudySessionResponse>> {
    let view = state
        .sessions
        .apply(auth.user.id, session_id, payload.command)
        .await?;
    Ok(Json(StudySessionResponse { session_id, view }))
}

/// POST /api/study/:session_id/key
pub async fn key(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<StudyKeyRequest>,
) -> Result<Json<StudySessionResponse>> {
    let view = state
        .sessions
        .press_key(auth.user.id, session_id, &payload.key)
        .await?;
    Ok(Json(StudySessionResponse { session_id, view }))
}

/// DELETE /api/study/:session_id
pub async fn end(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    state.sessions.end(auth.user.id, session_id).await?;
    Ok(Json(serde_json::json!({ "ended": true })))
}
