/**
 * Authentication Middleware
 *
 * Protects the member and photo routes. Extracts the bearer token from
 * the Authorization header, verifies it through the injected token
 * issuer, confirms the account still exists and attaches the identity to
 * the request extensions for handlers to pick up.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// Identity established by the auth middleware.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Bearer-token middleware. Returns 401 when the token is missing,
/// malformed, expired or bound to an account that no longer exists.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("missing Authorization header");
            AppError::unauthorized("missing Authorization header")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("malformed Authorization header");
        AppError::unauthorized("expected a bearer token")
    })?;

    let claims = state.tokens.verify(token)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::unauthorized("malformed token subject"))?;

    // The token may outlive the account it was issued for.
    if state.store.find_by_id(user_id).await?.is_none() {
        tracing::warn!("token for unknown account {user_id}");
        return Err(AppError::unauthorized("unknown account"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
    });

    Ok(next.run(request).await)
}

/// Extractor handing the authenticated identity to protected handlers.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                AppError::unauthorized("not authenticated")
            })?;

        Ok(AuthUser(user))
    }
}
