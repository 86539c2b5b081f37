//! User registration and profile endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::{UserRegisterRequest, UserRegisterResponse, UserResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/users/register
/// Creates a new user and returns the token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Option<UserRegisterRequest>>,
) -> Result<Json<UserRegisterResponse>> {
    let name = payload.and_then(|p| p.name);
    let user = state.db.create_user(name.as_deref()).await?;

    tracing::info!("Registered new user: {}", user.id);

    Ok(Json(UserRegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/users/me
pub async fn me(Extension(auth): Extension<AuthenticatedUser>) -> Json<UserResponse> {
    let user = auth.user;
    Json(UserResponse {
        user_id: user.id,
        name: user.name,
        last_seen_at: user.last_seen_at,
    })
}
