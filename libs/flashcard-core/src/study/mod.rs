//! Study session state machine.
//!
//! A session owns one pass over a fixed, ordered list of cards. It tracks
//! the current position, which side is showing and which cards the user has
//! marked as known. Once every card is known the session is complete and
//! only `reset` or `shuffle` start a new pass.

pub mod keys;

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};
use crate::types::{Card, CardSide};

pub use keys::StudyCommand;

/// Lifecycle state of a study pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyState {
    InProgress,
    Complete,
}

/// Everything the interface needs to render after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyView {
    pub card_id: i64,
    pub side: CardSide,
    /// Front or back text, depending on `side`.
    pub text: String,
    /// 1-based position of the current card.
    pub position: usize,
    pub total: usize,
    pub is_current_card_known: bool,
    pub known_count: usize,
    pub progress_percent: u8,
    pub state: StudyState,
}

/// In-memory state of one study pass.
///
/// Card ids are expected to be unique within the deck.
#[derive(Debug, Clone)]
pub struct StudySession {
    original: Vec<Card>,
    ordered_cards: Vec<Card>,
    current_index: usize,
    is_flipped: bool,
    known_card_ids: HashSet<i64>,
}

impl StudySession {
    /// Start a pass over `cards` in the given order.
    pub fn start(cards: Vec<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(StudyError::EmptyDeck);
        }

        Ok(Self {
            ordered_cards: cards.clone(),
            original: cards,
            current_index: 0,
            is_flipped: false,
            known_card_ids: HashSet::new(),
        })
    }

    // === Transitions ===

    /// Turn the current card over.
    pub fn flip(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.is_flipped = !self.is_flipped;
        Ok(())
    }

    /// Move to the next card. Does nothing on the last card.
    pub fn next(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.advance();
        Ok(())
    }

    /// Move to the previous card. Does nothing on the first card.
    pub fn previous(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        if self.current_index > 0 {
            self.current_index -= 1;
            self.is_flipped = false;
        }
        Ok(())
    }

    /// Mark the current card as known.
    ///
    /// Completes the pass when every card is known, otherwise moves on to
    /// the next card. Re-marking a known card behaves the same way.
    pub fn mark_current_as_known(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        let id = self.ordered_cards[self.current_index].id;
        self.known_card_ids.insert(id);

        if !self.is_complete() {
            self.advance();
        }
        Ok(())
    }

    /// Restart with a fresh random order of the full deck.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Restart with a random order drawn from `rng`.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut cards = self.original.clone();
        cards.shuffle(rng);
        self.restart(cards);
    }

    /// Restart in the original order.
    pub fn reset(&mut self) {
        self.restart(self.original.clone());
    }

    /// Apply a command and return the resulting view.
    ///
    /// Navigation commands on a complete session fail with
    /// [`StudyError::SessionComplete`] and leave the state untouched.
    pub fn apply(&mut self, command: StudyCommand) -> Result<StudyView> {
        match command {
            StudyCommand::Flip => self.flip()?,
            StudyCommand::Next => self.next()?,
            StudyCommand::Previous => self.previous()?,
            StudyCommand::MarkKnown => self.mark_current_as_known()?,
            StudyCommand::Shuffle => self.shuffle(),
            StudyCommand::Reset => self.reset(),
        }
        Ok(self.view())
    }

    /// Command bound to `key` given the side currently showing.
    pub fn command_for_key(&self, key: &str) -> Option<StudyCommand> {
        StudyCommand::from_key(key, self.is_flipped)
    }

    fn advance(&mut self) {
        if self.current_index + 1 < self.ordered_cards.len() {
            self.current_index += 1;
            self.is_flipped = false;
        }
    }

    fn restart(&mut self, cards: Vec<Card>) {
        self.ordered_cards = cards;
        self.current_index = 0;
        self.is_flipped = false;
        self.known_card_ids.clear();
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.is_complete() {
            return Err(StudyError::SessionComplete);
        }
        Ok(())
    }

    // === Accessors ===

    pub fn current_card(&self) -> &Card {
        &self.ordered_cards[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    /// Cards in the order of the current pass.
    pub fn cards(&self) -> &[Card] {
        &self.ordered_cards
    }

    pub fn len(&self) -> usize {
        self.ordered_cards.len()
    }

    /// Always false; a session cannot be started without cards.
    pub fn is_empty(&self) -> bool {
        self.ordered_cards.is_empty()
    }

    pub fn known_count(&self) -> usize {
        self.known_card_ids.len()
    }

    pub fn is_known(&self, card_id: i64) -> bool {
        self.known_card_ids.contains(&card_id)
    }

    pub fn is_current_card_known(&self) -> bool {
        self.is_known(self.current_card().id)
    }

    pub fn is_complete(&self) -> bool {
        !self.ordered_cards.is_empty() && self.known_card_ids.len() == self.ordered_cards.len()
    }

    pub fn state(&self) -> StudyState {
        if self.is_complete() {
            StudyState::Complete
        } else {
            StudyState::InProgress
        }
    }

    /// Share of known cards, rounded to the nearest whole percent.
    pub fn progress_percent(&self) -> u8 {
        let ratio = self.known_card_ids.len() as f64 / self.ordered_cards.len() as f64;
        (ratio * 100.0).round() as u8
    }

    pub fn side(&self) -> CardSide {
        if self.is_flipped {
            CardSide::Back
        } else {
            CardSide::Front
        }
    }

    /// Text of the side currently showing.
    pub fn displayed_text(&self) -> &str {
        let card = self.current_card();
        match self.side() {
            CardSide::Front => &card.front,
            CardSide::Back => &card.back,
        }
    }

    pub fn view(&self) -> StudyView {
        StudyView {
            card_id: self.current_card().id,
            side: self.side(),
            text: self.displayed_text().to_string(),
            position: self.current_index + 1,
            total: self.ordered_cards.len(),
            is_current_card_known: self.is_current_card_known(),
            known_count: self.known_count(),
            progress_percent: self.progress_percent(),
            state: self.state(),
        }
    }
}
