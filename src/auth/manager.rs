/**
 * Credential Manager
 *
 * Registers new accounts and verifies login attempts. Works against an
 * injected `UserStore` and `TokenIssuer`; it never holds a database handle
 * of its own.
 *
 * Usernames are case-insensitive: they are lower-cased at registration
 * and every lookup normalizes its input the same way.
 */

use std::sync::Arc;

use crate::auth::credentials::{compute_digest, generate_salt, verify_password};
use crate::auth::tokens::TokenIssuer;
use crate::error::AppError;
use crate::members::model::Account;
use crate::members::store::UserStore;

/// Profile supplied at registration.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub known_as: String,
    pub gender: String,
    pub date_of_birth: chrono::NaiveDate,
    pub city: String,
    pub country: String,
}

#[derive(Clone)]
pub struct CredentialManager {
    store: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenIssuer>,
}

impl CredentialManager {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { store, tokens }
    }

    /// Register a new account.
    ///
    /// Fails with `UsernameTaken` if an account with the same
    /// case-insensitive username exists. On success the account is
    /// persisted with a fresh salt and digest, and a session token bound
    /// to it is returned alongside.
    pub async fn register(&self, new_account: NewAccount) -> Result<(Account, String), AppError> {
        let username = new_account.username.to_lowercase();
        tracing::info!("registration attempt for '{username}'");

        if self.store.exists(&username).await? {
            tracing::warn!("registration rejected, username '{username}' is taken");
            return Err(AppError::UsernameTaken { username });
        }

        let salt = generate_salt();
        let digest = compute_digest(&salt, &new_account.password);

        let account = Account::new(
            username,
            digest,
            salt,
            new_account.known_as,
            new_account.gender,
            new_account.date_of_birth,
            new_account.city,
            new_account.country,
        );

        self.store.save(&account).await?;
        let token = self.tokens.issue(&account)?;

        tracing::info!("registered account '{}'", account.username);
        Ok((account, token))
    }

    /// Verify a login attempt and issue a session token.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// `InvalidCredentials`; the two cases are indistinguishable to the
    /// caller. Nothing is persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<(Account, String), AppError> {
        let username = username.to_lowercase();
        tracing::info!("login attempt for '{username}'");

        let account = self
            .store
            .find_by_username(&username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&account.password_salt, &account.password_digest, password) {
            tracing::warn!("failed login for '{username}'");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account)?;
        tracing::info!("login succeeded for '{username}'");
        Ok((account, token))
    }
}
