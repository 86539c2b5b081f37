//! Bearer-token authentication for the protected routes

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::{ApiError, Result};
use crate::models::User;
use crate::AppState;

/// The user resolved from the request's token, with `last_seen_at` already bumped.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Resolve the bearer token to a user and make it available to handlers.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let token = bearer_token(request.headers())?;

    let known = state
        .db
        .get_user_by_token(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid user token".to_string()))?;
    let user = state.db.update_last_seen(known.id).await?;

    request.extensions_mut().insert(AuthenticatedUser { user });
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization format".to_string()))?;

    match value.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::Unauthorized(
            "Invalid Authorization format".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers("Bearer abc-123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc-123");
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn other_schemes_are_unauthorized() {
        for value in ["Basic dXNlcjpwYXNz", "abc-123", "Bearer ", "Bearer    "] {
            let err = bearer_token(&headers(value)).unwrap_err();
            assert!(matches!(err, ApiError::Unauthorized(_)), "accepted {value:?}");
        }
    }
}
