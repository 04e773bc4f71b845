/**
 * Application Error Types
 *
 * This module defines the error types returned by the credential manager,
 * the photo manager and the member directory. Every variant is recoverable
 * at the HTTP boundary: it maps to a status code and a user-visible message,
 * and no error here is fatal to the process.
 */

use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

/// All failure kinds surfaced by the application core.
///
/// Each variant is scoped to the single operation that produced it and is
/// converted to an HTTP response by the `IntoResponse` implementation in
/// [`crate::error::conversion`].
#[derive(Debug, Error)]
pub enum AppError {
    /// An account with the same (case-insensitive) username already exists.
    #[error("username '{username}' is taken")]
    UsernameTaken { username: String },

    /// Login failed. Unknown-user and wrong-password cases are deliberately
    /// indistinguishable so that the error surface leaks no account
    /// existence information.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Request is missing or carries an unusable bearer token.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Request payload failed validation before reaching a component.
    #[error("{message}")]
    Validation { message: String },

    /// No member with the given username.
    #[error("member '{username}' not found")]
    MemberNotFound { username: String },

    /// The photo id does not resolve to one of the account's photos.
    #[error("photo {photo_id} not found")]
    PhotoNotFound { photo_id: Uuid },

    /// The photo is already the account's main photo.
    #[error("this is already the main photo")]
    AlreadyMain,

    /// The main photo cannot be deleted; the caller must reassign main first.
    #[error("the main photo cannot be deleted")]
    CannotDeleteMain,

    /// The image-hosting collaborator rejected or failed the upload.
    #[error("photo upload failed: {message}")]
    Upload { message: String },

    /// The image-hosting collaborator failed to delete the remote image.
    /// Local state is left untouched when this is returned.
    #[error("photo deletion failed: {message}")]
    DeletionBackend { message: String },

    /// The user store reported a save failure.
    #[error("failed to persist changes: {message}")]
    Persistence { message: String },

    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session token could not be issued.
    #[error("token error: {message}")]
    Token { message: String },
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UsernameTaken { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::MemberNotFound { .. } => StatusCode::NOT_FOUND,
            Self::PhotoNotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyMain => StatusCode::BAD_REQUEST,
            Self::CannotDeleteMain => StatusCode::BAD_REQUEST,
            Self::Upload { .. } => StatusCode::BAD_REQUEST,
            Self::DeletionBackend { .. } => StatusCode::BAD_GATEWAY,
            Self::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-visible message for this error.
    ///
    /// Internal failures (database, token issuing) are reported with a
    /// generic message; the detail is logged server-side only.
    pub fn message(&self) -> String {
        match self {
            Self::Database(_) => "internal server error".to_string(),
            Self::Token { .. } => "internal server error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        let taken = AppError::UsernameTaken {
            username: "alice".into(),
        };
        assert_eq!(taken.status_code(), StatusCode::BAD_REQUEST);

        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::AlreadyMain.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::CannotDeleteMain.status_code(),
            StatusCode::BAD_REQUEST
        );

        let not_found = AppError::PhotoNotFound {
            photo_id: Uuid::new_v4(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let persistence = AppError::persistence("save returned false");
        assert_eq!(
            persistence.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_user_and_wrong_password_share_one_surface() {
        // Both login failure paths produce this same variant, so the message
        // and status are identical by construction.
        let err = AppError::InvalidCredentials;
        assert_eq!(err.message(), "invalid username or password");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_errors_use_generic_message() {
        let err = AppError::Token {
            message: "bad signing key".into(),
        };
        assert_eq!(err.message(), "internal server error");
        assert!(!err.message().contains("signing"));
    }
}
