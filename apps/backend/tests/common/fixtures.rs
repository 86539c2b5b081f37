//! Test fixtures and factory functions for request bodies.

use serde_json::json;

/// Create a user register request body.
pub fn user_register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create a deck request body (used for both create and update).
pub fn deck_request(title: &str, description: Option<&str>) -> serde_json::Value {
    json!({ "title": title, "description": description })
}

/// Create a card request body (used for both create and update).
pub fn card_request(front: &str, back: &str) -> serde_json::Value {
    json!({ "front": front, "back": back })
}

/// Create a study command request body.
pub fn study_command(command: &str) -> serde_json::Value {
    json!({ "command": command })
}

/// Create a study key press request body.
pub fn study_key(key: &str) -> serde_json::Value {
    json!({ "key": key })
}

/// The two-card Indonesian vocabulary deck used across study tests.
pub fn animal_cards() -> Vec<(&'static str, &'static str)> {
    vec![("Dog", "Anjing"), ("Cat", "Kucing")]
}
