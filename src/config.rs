/**
 * Server Configuration
 *
 * Environment-driven configuration and collaborator wiring. Missing
 * optional services are logged and degraded gracefully: without a
 * `DATABASE_URL` the server runs on the in-memory store, which loses all
 * accounts on restart.
 */

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::tokens::JwtTokenIssuer;
use crate::members::store::{MemoryUserStore, PgUserStore, UserStore};
use crate::photos::hosting::HttpImageHost;
use crate::state::AppState;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL_DAYS: u64 = 7;
const DEFAULT_IMAGE_HOST_URL: &str = "http://localhost:8200";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_days: u64,
    pub image_host_url: String,
    pub image_host_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using an insecure development secret");
            "insecure-dev-secret-change-me".to_string()
        });

        let token_ttl_days = std::env::var("TOKEN_TTL_DAYS")
            .ok()
            .and_then(|d| d.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_DAYS);

        let image_host_url = std::env::var("IMAGE_HOST_URL").unwrap_or_else(|_| {
            tracing::warn!(
                "IMAGE_HOST_URL not set, defaulting to {DEFAULT_IMAGE_HOST_URL}"
            );
            DEFAULT_IMAGE_HOST_URL.to_string()
        });

        Self {
            port,
            jwt_secret,
            token_ttl_days,
            image_host_url,
            image_host_key: std::env::var("IMAGE_HOST_KEY").ok(),
        }
    }
}

/// Connect to Postgres and run migrations.
///
/// Returns `None` when `DATABASE_URL` is unset or the connection fails;
/// the caller falls back to the in-memory store.
pub async fn load_database() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, accounts will not survive a restart");
            return None;
        }
    };

    tracing::info!("connecting to database...");
    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("failed to create database connection pool: {e}");
            tracing::warn!("falling back to the in-memory store");
            return None;
        }
    };

    tracing::info!("running database migrations...");
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        tracing::error!("failed to run database migrations: {e}");
    }

    Some(pool)
}

/// Wire the application state from configuration.
pub async fn build_state(config: &ServerConfig) -> AppState {
    let store: Arc<dyn UserStore> = match load_database().await {
        Some(pool) => Arc::new(PgUserStore::new(pool)),
        None => Arc::new(MemoryUserStore::new()),
    };

    let image_host = Arc::new(HttpImageHost::new(
        config.image_host_url.clone(),
        config.image_host_key.clone(),
    ));

    let tokens = Arc::new(JwtTokenIssuer::new(
        config.jwt_secret.clone(),
        config.token_ttl_days,
    ));

    AppState::new(store, image_host, tokens)
}
