//! Server-hosted study sessions.
//!
//! Each session lives in memory only and belongs to the user who started it.
//! Nothing about study progress is written to the database.
//!
//! A session disappears when it is ended explicitly, when its deck is deleted,
//! when the same user starts another pass over the same deck, or after it has
//! been idle longer than the store's idle timeout.

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use flashcard_core::{Card, Deck, StudyCommand, StudySession, StudyView};
use tokio::sync::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

use crate::db::Database;
use crate::error::{ApiError, Result};

/// Sessions untouched for this long are discarded.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// A deck together with its cards in study order.
#[derive(Debug, Clone)]
pub struct StudyDeck {
    pub deck: Deck,
    pub cards: Vec<Card>,
}

/// Supplies the ordered cards of a deck on behalf of a user.
///
/// Must fail with `NotFound` when the deck is missing or owned by someone else.
pub trait CardSource {
    fn load_deck(
        &self,
        deck_id: i64,
        user_id: Uuid,
    ) -> impl Future<Output = Result<StudyDeck>> + Send;
}

impl CardSource for Database {
    async fn load_deck(&self, deck_id: i64, user_id: Uuid) -> Result<StudyDeck> {
        let deck = self
            .get_deck(user_id, deck_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Deck not found or access denied".to_string()))?;
        let cards = self.get_deck_cards(deck.id).await?;

        Ok(StudyDeck {
            deck: deck.to_api_deck(),
            cards: cards.iter().map(|c| c.to_api_card()).collect(),
        })
    }
}

/// Result of starting a study pass.
#[derive(Debug)]
pub struct StartedSession {
    pub session_id: Uuid,
    pub deck: Deck,
    pub view: StudyView,
}

struct HostedSession {
    user_id: Uuid,
    deck_id: i64,
    session: StudySession,
    last_used: Instant,
}

impl HostedSession {
    fn apply(&mut self, session_id: Uuid, command: StudyCommand) -> Result<StudyView> {
        self.last_used = Instant::now();

        match self.session.apply(command) {
            Ok(view) => {
                tracing::debug!(%session_id, command = command.as_str(), position = view.position, "Applied study command");
                Ok(view)
            }
            Err(e) => {
                tracing::warn!(%session_id, command = command.as_str(), "Rejected study command: {}", e);
                Err(e.into())
            }
        }
    }
}

/// Registry of live study sessions keyed by session id.
pub struct StudySessionStore {
    sessions: RwLock<HashMap<Uuid, HostedSession>>,
    idle_timeout: Duration,
}

impl Default for StudySessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl StudySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Start a study pass over a deck the user owns.
    ///
    /// Replaces any pass the same user still had open on that deck.
    pub async fn start<S: CardSource>(
        &self,
        source: &S,
        user_id: Uuid,
        deck_id: i64,
    ) -> Result<StartedSession> {
        let StudyDeck { deck, cards } = source.load_deck(deck_id, user_id).await?;
        if cards.is_empty() {
            return Err(ApiError::BadRequest("Deck has no cards to study".to_string()));
        }

        let session = StudySession::start(cards)?;
        let view = session.view();
        let session_id = Uuid::new_v4();

        let mut sessions = self.live().await;
        let before = sessions.len();
        sessions.retain(|_, hosted| !(hosted.user_id == user_id && hosted.deck_id == deck.id));
        let replaced = before - sessions.len();

        sessions.insert(
            session_id,
            HostedSession {
                user_id,
                deck_id: deck.id,
                session,
                last_used: Instant::now(),
            },
        );

        tracing::info!(%session_id, deck_id = deck.id, replaced, "Started study session");
        Ok(StartedSession {
            session_id,
            deck,
            view,
        })
    }

    /// Current view of a session.
    pub async fn view(&self, user_id: Uuid, session_id: Uuid) -> Result<StudyView> {
        let mut sessions = self.live().await;
        let hosted = owned(sessions.get_mut(&session_id), user_id)?;
        hosted.last_used = Instant::now();
        Ok(hosted.session.view())
    }

    /// Apply a command to a session.
    pub async fn apply(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        command: StudyCommand,
    ) -> Result<StudyView> {
        let mut sessions = self.live().await;
        owned(sessions.get_mut(&session_id), user_id)?.apply(session_id, command)
    }

    /// Apply the command bound to a key. Unbound keys leave the session unchanged.
    ///
    /// The binding is resolved against the same state the command is applied to.
    pub async fn press_key(&self, user_id: Uuid, session_id: Uuid, key: &str) -> Result<StudyView> {
        let mut sessions = self.live().await;
        let hosted = owned(sessions.get_mut(&session_id), user_id)?;

        match hosted.session.command_for_key(key) {
            Some(command) => hosted.apply(session_id, command),
            None => {
                hosted.last_used = Instant::now();
                Ok(hosted.session.view())
            }
        }
    }

    /// Discard a session.
    pub async fn end(&self, user_id: Uuid, session_id: Uuid) -> Result<()> {
        let mut sessions = self.live().await;
        owned(sessions.get_mut(&session_id), user_id)?;
        sessions.remove(&session_id);

        tracing::info!(%session_id, "Ended study session");
        Ok(())
    }

    /// Discard every session studying a deck, e.g. after the deck was deleted.
    pub async fn end_for_deck(&self, deck_id: i64) -> usize {
        let mut sessions = self.live().await;
        let before = sessions.len();
        sessions.retain(|_, hosted| hosted.deck_id != deck_id);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.live().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.live().await.is_empty()
    }

    // Write guard over the map with idle sessions already swept out.
    async fn live(&self) -> RwLockWriteGuard<'_, HashMap<Uuid, HostedSession>> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, hosted| hosted.last_used.elapsed() < self.idle_timeout);

        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted idle study sessions");
        }
        sessions
    }
}

// Sessions of other users are reported as missing.
fn owned(hosted: Option<&mut HostedSession>, user_id: Uuid) -> Result<&mut HostedSession> {
    hosted
        .filter(|h| h.user_id == user_id)
        .ok_or_else(|| ApiError::NotFound("Study session not found".to_string()))
}
