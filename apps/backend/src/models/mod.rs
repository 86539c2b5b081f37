//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from flashcard-core
pub use flashcard_core::types::{Card, DashboardStats, Deck, DeckWithCardCount};
pub use flashcard_core::{StudyCommand, StudyState, StudyView};

// === Database Entity Types ===

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Deck stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDeck {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbDeck {
    /// Convert to API deck type
    pub fn to_api_deck(&self) -> Deck {
        Deck {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            user_id: self.user_id.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Deck row joined with its card count
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDeckSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub card_count: i64,
}

impl DbDeckSummary {
    pub fn to_api_summary(&self) -> DeckWithCardCount {
        DeckWithCardCount {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            card_count: self.card_count,
        }
    }
}

/// Card stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCard {
    pub id: i64,
    pub deck_id: i64,
    pub front: String,
    pub back: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbCard {
    /// Convert to API card type
    pub fn to_api_card(&self) -> Card {
        Card {
            id: self.id,
            deck_id: self.deck_id,
            front: self.front.clone(),
            back: self.back.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// === API Request/Response Types ===

// User types
#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub last_seen_at: DateTime<Utc>,
}

// Deck types
#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckWithCardCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckDetailResponse {
    pub deck: Deck,
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeckRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDeckRequest {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteDeckResponse {
    pub deleted: bool,
}

// Card types
#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteCardResponse {
    pub deck_id: i64,
}

// Dashboard types
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub recent_decks: Vec<DeckWithCardCount>,
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
pub struct StartStudyResponse {
    pub session_id: Uuid,
    pub deck: Deck,
    pub view: StudyView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyCommandRequest {
    pub command: StudyCommand,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudyKeyRequest {
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudySessionResponse {
    pub session_id: Uuid,
    pub view: StudyView,
}
