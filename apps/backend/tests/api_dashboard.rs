//! Dashboard API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use common::TestContext;

/// Test dashboard is all zeros for a new user.
#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_empty() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let response = server
        .get("/api/dashboard")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["stats"]["total_decks"], 0);
    assert_eq!(body["stats"]["total_cards"], 0);
    assert_eq!(body["stats"]["study_sessions"], 0);
    assert!(body["recent_decks"].as_array().unwrap().is_empty());

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test dashboard counts decks, cards and study sessions.
#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_counts() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    let animals = ctx.create_test_deck(user_id, "Animals").await;
    let colors = ctx.create_test_deck(user_id, "Colors").await;
    ctx.create_test_card(animals.id, "Dog", "Anjing").await;
    ctx.create_test_card(animals.id, "Cat", "Kucing").await;
    ctx.create_test_card(colors.id, "Red", "Merah").await;

    let response = server
        .post(&format!("/api/decks/{}/study", animals.id))
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;
    response.assert_status_ok();

    let response = server
        .get("/api/dashboard")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["stats"]["total_decks"], 2);
    assert_eq!(body["stats"]["total_cards"], 3);
    assert_eq!(body["stats"]["study_sessions"], 1);

    let recent = body["recent_decks"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0]["title"], "Colors");
    assert_eq!(recent[1]["card_count"], 2);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test the recent deck limit.
#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_recent_limit() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user(None).await;

    for i in 0..3 {
        ctx.create_test_deck(user_id, &format!("Deck {}", i)).await;
    }

    let response = server
        .get("/api/dashboard?limit=2")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["recent_decks"].as_array().unwrap().len(), 2);
    assert_eq!(body["stats"]["total_decks"], 3);

    // Cleanup
    ctx.cleanup_user(user_id).await;
}

/// Test dashboard requires authentication.
#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_requires_auth() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.get("/api/dashboard").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
