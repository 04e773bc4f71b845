/**
 * Register Handler
 *
 * POST /api/account/register
 *
 * Validates the payload, delegates to the credential manager and returns
 * the issued session token. Duplicate usernames (case-insensitive) are
 * rejected with 400.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::auth::manager::{CredentialManager, NewAccount};
use crate::error::AppError;

/// Usernames are 3-30 characters, start with a letter, and contain only
/// letters, digits and underscores.
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub async fn register(
    State(credentials): State<CredentialManager>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    tracing::info!("register request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        return Err(AppError::validation(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }
    if request.password.len() < 8 {
        return Err(AppError::validation(
            "Password must be at least 8 characters",
        ));
    }
    if request.gender != "male" && request.gender != "female" {
        return Err(AppError::validation("Gender must be 'male' or 'female'"));
    }

    let (account, token) = credentials
        .register(NewAccount {
            username: request.username,
            password: request.password,
            known_as: request.known_as,
            gender: request.gender,
            date_of_birth: request.date_of_birth,
            city: request.city,
            country: request.country,
        })
        .await?;

    Ok(Json(AuthResponse {
        username: account.username,
        token,
        known_as: account.known_as,
        photo_url: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("alice_99"));
        assert!(is_valid_username("Bob"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("9lives"));
        assert!(!is_valid_username("_alice"));
        assert!(!is_valid_username("alice smith"));
        assert!(!is_valid_username(&"a".repeat(31)));
    }
}
