pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::study::StudySessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub sessions: Arc<StudySessionStore>,
    pub recent_decks_limit: i64,
}

impl AppState {
    pub fn new(db: Database, sessions: StudySessionStore, recent_decks_limit: i64) -> Self {
        Self {
            db: Arc::new(db),
            sessions: Arc::new(sessions),
            recent_decks_limit,
        }
    }
}

/// Build the API router with all routes.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // User routes
        .route("/api/users/me", get(routes::users::me))
        // Dashboard
        .route("/api/dashboard", get(routes::dashboard::get))
        // Deck routes
        .route(
            "/api/decks",
            get(routes::decks::list).post(routes::decks::create),
        )
        .route(
            "/api/decks/:id",
            get(routes::decks::get)
                .put(routes::decks::update)
                .delete(routes::decks::delete),
        )
        // Card routes
        .route(
            "/api/decks/:id/cards",
            get(routes::cards::list).post(routes::cards::create),
        )
        .route(
            "/api/cards/:id",
            get(routes::cards::get)
                .put(routes::cards::update)
                .delete(routes::cards::delete),
        )
        // Study routes
        .route("/api/decks/:id/study", post(routes::study::start))
        .route(
            "/api/study/:session_id",
            get(routes::study::view).delete(routes::study::end),
        )
        .route("/api/study/:session_id/command", post(routes::study::command))
        .route("/api/study/:session_id/key", post(routes::study::key))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let sessions = StudySessionStore::with_idle_timeout(config.study_session_idle_timeout());
    let state = AppState::new(db, sessions, config.recent_decks_limit);

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
