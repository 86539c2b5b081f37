//! Error types for flashcard-core.

use thiserror::Error;

/// Result type alias using StudyError.
pub type Result<T> = std::result::Result<T, StudyError>;

/// Errors raised by a study session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    /// A session was started with no cards. Callers must check first.
    #[error("cannot study an empty deck")]
    EmptyDeck,

    #[error("study session is complete; reset or shuffle to study again")]
    SessionComplete,
}

/// Invalid user input for a deck or card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}
