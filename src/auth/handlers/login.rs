/**
 * Login Handler
 *
 * POST /api/account/login
 *
 * Verifies the credentials and returns a session token. Unknown-user and
 * wrong-password failures share one 401 response so the endpoint leaks no
 * account existence information.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::auth::manager::CredentialManager;
use crate::error::AppError;

pub async fn login(
    State(credentials): State<CredentialManager>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    tracing::info!("login request for: {}", request.username);

    let (account, token) = credentials
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(AuthResponse {
        username: account.username.clone(),
        token,
        known_as: account.known_as.clone(),
        photo_url: account.main_photo().map(|p| p.url.clone()),
    }))
}
