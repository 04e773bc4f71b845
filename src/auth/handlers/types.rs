/**
 * Authentication Handler Types
 *
 * Request and response types shared by the register and login handlers.
 */

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registration request.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    /// Chosen username (case-insensitive unique, stored lower-cased)
    pub username: String,
    /// Password (hashed before storage, never persisted as-is)
    pub password: String,
    /// Display name
    pub known_as: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub country: String,
}

/// Login request.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by register and login. Carries the session token and the
/// minimal identity the client needs; never the digest or salt.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub username: String,
    pub token: String,
    pub known_as: String,
    /// Main photo URL, when the account has one (login only fills this
    /// in; a freshly registered account owns no photos).
    pub photo_url: Option<String>,
}
