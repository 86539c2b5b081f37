//! Dashboard endpoint

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

const MAX_RECENT_DECKS: i64 = 50;

/// GET /api/dashboard
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>> {
    let limit = query
        .limit
        .unwrap_or(state.recent_decks_limit)
        .clamp(1, MAX_RECENT_DECKS);

    let stats = state.db.get_dashboard_stats(auth.user.id).await?;
    let recent = state.db.get_recent_decks(auth.user.id, limit).await?;

    Ok(Json(DashboardResponse {
        stats,
        recent_decks: recent.iter().map(|d| d.to_api_summary()).collect(),
    }))
}
