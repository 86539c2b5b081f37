//! Core flashcard library shared by the backend and any study client.
//!
//! Provides:
//! - Study session state machine (flip, navigate, mark known, shuffle, reset)
//! - Keyboard shortcut mapping for study commands
//! - Deck and card input validation
//! - Shared types (Card, Deck, DashboardStats, etc.)

pub mod error;
pub mod study;
pub mod types;
pub mod validation;

pub use error::{Result, StudyError, ValidationError};
pub use study::{StudyCommand, StudySession, StudyState, StudyView};
pub use types::{Card, CardSide, DashboardStats, Deck, DeckWithCardCount};
