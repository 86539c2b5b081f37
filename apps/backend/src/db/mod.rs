//! PostgreSQL database operations
//!
//! Every deck and card query is scoped to the owning user. A deck that
//! exists but belongs to someone else is indistinguishable from a missing one.

use sqlx::{postgres::PgPoolOptions, PgExecutor, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (token, name)
            VALUES ($1, $2)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Bump a user's last_seen_at and return the refreshed row
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    // === Deck Repository ===

    /// Get all decks for a user with card counts
    pub async fn get_user_decks(&self, user_id: Uuid) -> Result<Vec<DbDeckSummary>> {
        let decks = sqlx::query_as::<_, DbDeckSummary>(
            r#"
            SELECT d.id, d.title, d.description, d.created_at, d.updated_at,
                   COUNT(c.id) AS card_count
            FROM decks d
            LEFT JOIN cards c ON c.deck_id = d.id
            WHERE d.user_id = $1
            GROUP BY d.id
            ORDER BY d.updated_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(decks)
    }

    /// Get the most recently created decks for a user
    pub async fn get_recent_decks(&self, user_id: Uuid, limit: i64) -> Result<Vec<DbDeckSummary>> {
        let decks = sqlx::query_as::<_, DbDeckSummary>(
            r#"
            SELECT d.id, d.title, d.description, d.created_at, d.updated_at,
                   COUNT(c.id) AS card_count
            FROM decks d
            LEFT JOIN cards c ON c.deck_id = d.id
            WHERE d.user_id = $1
            GROUP BY d.id
            ORDER BY d.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(decks)
    }

    /// Get a deck owned by the user
    pub async fn get_deck(&self, user_id: Uuid, deck_id: i64) -> Result<Option<DbDeck>> {
        let deck = sqlx::query_as::<_, DbDeck>(
            r#"
            SELECT id, user_id, title, description, created_at, updated_at
            FROM decks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(deck_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deck)
    }

    /// Create a deck
    pub async fn create_deck(
        &self,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
    ) -> Result<DbDeck> {
        let deck = sqlx::query_as::<_, DbDeck>(
            r#"
            INSERT INTO decks (user_id, title, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, description, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(deck)
    }

    /// Update a deck's title and description
    pub async fn update_deck(
        &self,
        user_id: Uuid,
        deck_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Option<DbDeck>> {
        let deck = sqlx::query_as::<_, DbDeck>(
            r#"
            UPDATE decks
            SET title = $3, description = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, created_at, updated_at
            "#,
        )
        .bind(deck_id)
        .bind(user_id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deck)
    }

    /// Delete a deck and, through the foreign key, its cards
    pub async fn delete_deck(&self, user_id: Uuid, deck_id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM decks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(deck_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Card Repository ===

    /// Get all cards of a deck, most recently updated first
    pub async fn get_deck_cards(&self, deck_id: i64) -> Result<Vec<DbCard>> {
        let cards = sqlx::query_as::<_, DbCard>(
            r#"
            SELECT id, deck_id, front, back, created_at, updated_at
            FROM cards
            WHERE deck_id = $1
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    /// Get a card whose deck is owned by the user
    pub async fn get_card(&self, user_id: Uuid, card_id: i64) -> Result<Option<DbCard>> {
        let card = sqlx::query_as::<_, DbCard>(
            r#"
            SELECT c.id, c.deck_id, c.front, c.back, c.created_at, c.updated_at
            FROM cards c
            JOIN decks d ON d.id = c.deck_id
            WHERE c.id = $1 AND d.user_id = $2
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// Create a card. The caller must have checked deck ownership.
    pub async fn create_card(&self, deck_id: i64, front: &str, back: &str) -> Result<DbCard> {
        let mut tx = self.pool.begin().await?;

        let card = sqlx::query_as::<_, DbCard>(
            r#"
            INSERT INTO cards (deck_id, front, back)
            VALUES ($1, $2, $3)
            RETURNING id, deck_id, front, back, created_at, updated_at
            "#,
        )
        .bind(deck_id)
        .bind(front)
        .bind(back)
        .fetch_one(&mut *tx)
        .await?;

        bump_deck_updated_at(&mut *tx, deck_id).await?;
        tx.commit().await?;

        Ok(card)
    }

    /// Update both sides of a card owned by the user
    pub async fn update_card(
        &self,
        user_id: Uuid,
        card_id: i64,
        front: &str,
        back: &str,
    ) -> Result<Option<DbCard>> {
        let mut tx = self.pool.begin().await?;

        let card = sqlx::query_as::<_, DbCard>(
            r#"
            UPDATE cards c
            SET front = $3, back = $4, updated_at = NOW()
            FROM decks d
            WHERE c.id = $1 AND d.id = c.deck_id AND d.user_id = $2
            RETURNING c.id, c.deck_id, c.front, c.back, c.created_at, c.updated_at
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .bind(front)
        .bind(back)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(card) = &card {
            bump_deck_updated_at(&mut *tx, card.deck_id).await?;
        }
        tx.commit().await?;

        Ok(card)
    }

    /// Delete a card owned by the user, returning the deck it belonged to
    pub async fn delete_card(&self, user_id: Uuid, card_id: i64) -> Result<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let deck_id: Option<i64> = sqlx::query_scalar(
            r#"
            DELETE FROM cards c
            USING decks d
            WHERE c.id = $1 AND d.id = c.deck_id AND d.user_id = $2
            RETURNING c.deck_id
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(deck_id) = deck_id {
            bump_deck_updated_at(&mut *tx, deck_id).await?;
        }
        tx.commit().await?;

        Ok(deck_id)
    }

    // === Dashboard ===

    /// Get deck, card and weekly study session counts for a user
    pub async fn get_dashboard_stats(&self, user_id: Uuid) -> Result<DashboardStats> {
        let total_decks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM decks WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let total_cards: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM cards c
            JOIN decks d ON d.id = c.deck_id
            WHERE d.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let study_sessions: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM study_sessions
            WHERE user_id = $1 AND started_at >= NOW() - INTERVAL '7 days'
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardStats {
            total_decks,
            total_cards,
            study_sessions,
        })
    }

    // === Study Sessions ===

    /// Record that a study pass was started
    pub async fn record_study_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
        deck_id: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO study_sessions (id, user_id, deck_id)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session_id)
        .bind(user_id)
        .bind(deck_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Bump a deck's updated_at after one of its cards changed
async fn bump_deck_updated_at<'e, E: PgExecutor<'e>>(executor: E, deck_id: i64) -> Result<()> {
    sqlx::query("UPDATE decks SET updated_at = NOW() WHERE id = $1")
        .bind(deck_id)
        .execute(executor)
        .await?;

    Ok(())
}
