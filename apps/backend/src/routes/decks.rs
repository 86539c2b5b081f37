//! Deck endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use flashcard_core::validation;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

fn deck_not_found() -> ApiError {
    ApiError::NotFound("Deck not found or access denied".to_string())
}

/// GET /api/decks
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<DeckListResponse>> {
    let decks = state.db.get_user_decks(auth.user.id).await?;
    Ok(Json(DeckListResponse {
        decks: decks.iter().map(|d| d.to_api_summary()).collect(),
    }))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<Json<Deck>> {
    let title = validation::deck_title(&payload.title)?;
    let description = validation::deck_description(payload.description.as_deref())?;

    let deck = state
        .db
        .create_deck(auth.user.id, &title, description.as_deref())
        .await?;

    tracing::info!("Created deck {} for user {}", deck.id, auth.user.id);
    Ok(Json(deck.to_api_deck()))
}

/// GET /api/decks/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
) -> Result<Json<DeckDetailResponse>> {
    let deck = state
        .db
        .get_deck(auth.user.id, deck_id)
        .await?
        .ok_or_else(deck_not_found)?;
    let cards = state.db.get_deck_cards(deck.id).await?;

    Ok(Json(DeckDetailResponse {
        deck: deck.to_api_deck(),
        cards: cards.iter().map(|c| c.to_api_card()).collect(),
    }))
}

/// PUT /api/decks/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
    Json(payload): Json<UpdateDeckRequest>,
) -> Result<Json<Deck>> {
    let title = validation::deck_title(&payload.title)?;
    let description = validation::deck_description(payload.description.as_deref())?;

    let deck = state
        .db
        .update_deck(auth.user.id, deck_id, &title, description.as_deref())
        .await?
        .ok_or_else(deck_not_found)?;

    tracing::info!("Updated deck {} for user {}", deck.id, auth.user.id);
    Ok(Json(deck.to_api_deck()))
}

/// DELETE /api/decks/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
) -> Result<Json<DeleteDeckResponse>> {
    if !state.db.delete_deck(auth.user.id, deck_id).await? {
        return Err(deck_not_found());
    }

    let ended = state.sessions.end_for_deck(deck_id).await;
    tracing::info!("Deleted deck {} ({} study sessions discarded)", deck_id, ended);

    Ok(Json(DeleteDeckResponse { deleted: true }))
}
