//! Input validation for deck and card forms.

use crate::error::ValidationError;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Validate a deck title and return it trimmed.
pub fn deck_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::new("title", "Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::new("title", "Title too long"));
    }
    Ok(title.to_string())
}

/// Validate an optional deck description.
///
/// Blank descriptions are stored as `None`.
pub fn deck_description(description: Option<&str>) -> Result<Option<String>, ValidationError> {
    match description.map(str::trim) {
        None | Some("") => Ok(None),
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LEN => {
            Err(ValidationError::new("description", "Description too long"))
        }
        Some(d) => Ok(Some(d.to_string())),
    }
}

/// Validate the two sides of a card.
pub fn card_sides(front: &str, back: &str) -> Result<(String, String), ValidationError> {
    let front = front.trim();
    let back = back.trim();
    if front.is_empty() {
        return Err(ValidationError::new("front", "Front text is required"));
    }
    if back.is_empty() {
        return Err(ValidationError::new("back", "Back text is required"));
    }
    Ok((front.to_string(), back.to_string()))
}
