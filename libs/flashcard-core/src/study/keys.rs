//! Study commands and their keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// A user action on a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyCommand {
    Flip,
    Next,
    Previous,
    MarkKnown,
    Shuffle,
    Reset,
}

impl StudyCommand {
    /// Map a key name (as reported by a browser `KeyboardEvent.key`) to a command.
    ///
    /// "Mark as known" is only bound while the answer is showing.
    pub fn from_key(key: &str, is_flipped: bool) -> Option<Self> {
        match key {
            " " | "Enter" => Some(Self::Flip),
            "ArrowLeft" => Some(Self::Previous),
            "ArrowRight" => Some(Self::Next),
            "k" | "K" if is_flipped => Some(Self::MarkKnown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flip => "flip",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::MarkKnown => "mark_known",
            Self::Shuffle => "shuffle",
            Self::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_keys() {
        assert_eq!(StudyCommand::from_key(" ", false), Some(StudyCommand::Flip));
        assert_eq!(StudyCommand::from_key("Enter", true), Some(StudyCommand::Flip));
    }

    #[test]
    fn arrow_keys() {
        assert_eq!(
            StudyCommand::from_key("ArrowLeft", false),
            Some(StudyCommand::Previous)
        );
        assert_eq!(
            StudyCommand::from_key("ArrowRight", true),
            Some(StudyCommand::Next)
        );
    }

    #[test]
    fn mark_known_requires_flipped_card() {
        assert_eq!(StudyCommand::from_key("k", false), None);
        assert_eq!(StudyCommand::from_key("K", true), Some(StudyCommand::MarkKnown));
        assert_eq!(StudyCommand::from_key("k", true), Some(StudyCommand::MarkKnown));
    }

    #[test]
    fn unbound_keys() {
        assert_eq!(StudyCommand::from_key("x", true), None);
        assert_eq!(StudyCommand::from_key("ArrowUp", false), None);
    }
}
