//! Card endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use flashcard_core::validation;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

fn card_not_found() -> ApiError {
    ApiError::NotFound("Card not found or access denied".to_string())
}

/// GET /api/decks/:id/cards
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
) -> Result<Json<CardListResponse>> {
    let deck = state
        .db
        .get_deck(auth.user.id, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deck not found or access denied".to_string()))?;
    let cards = state.db.get_deck_cards(deck.id).await?;

    Ok(Json(CardListResponse {
        cards: cards.iter().map(|c| c.to_api_card()).collect(),
    }))
}

/// POST /api/decks/:id/cards
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
    Json(payload): Json<CreateCardRequest>,
) -> Result<Json<Card>> {
    let (front, back) = validation::card_sides(&payload.front, &payload.back)?;

    let deck = state
        .db
        .get_deck(auth.user.id, deck_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deck not found or access denied".to_string()))?;

    let card = state.db.create_card(deck.id, &front, &back).await?;

    tracing::info!("Created card {} in deck {}", card.id, deck.id);
    Ok(Json(card.to_api_card()))
}

/// GET /api/cards/:id
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
) -> Result<Json<Card>> {
    let card = state
        .db
        .get_card(auth.user.id, card_id)
        .await?
        .ok_or_else(card_not_found)?;

    Ok(Json(card.to_api_card()))
}

/// PUT /api/cards/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
    Json(payload): Json<UpdateCardRequest>,
) -> Result<Json<Card>> {
    let (front, back) = validation::card_sides(&payload.front, &payload.back)?;

    let card = state
        .db
        .update_card(auth.user.id, card_id, &front, &back)
        .await?
        .ok_or_else(card_not_found)?;

    tracing::info!("Updated card {} in deck {}", card.id, card.deck_id);
    Ok(Json(card.to_api_card()))
}

/// DELETE /api/cards/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
) -> Result<Json<DeleteCardResponse>> {
    let deck_id = state
        .db
        .delete_card(auth.user.id, card_id)
        .await?
        .ok_or_else(card_not_found)?;

    tracing::info!("Deleted card {} from deck {}", card_id, deck_id);
    Ok(Json(DeleteCardResponse { deck_id }))
}
