/**
 * Application State
 *
 * Central state container for the Axum application. Every collaborator
 * (user store, image host, token issuer) is an injected trait object; no
 * component reaches for a process-wide handle.
 *
 * `FromRef` implementations let handlers extract just the piece they
 * need instead of the whole `AppState`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::manager::CredentialManager;
use crate::auth::tokens::TokenIssuer;
use crate::members::store::UserStore;
use crate::photos::hosting::ImageHost;
use crate::photos::manager::PhotoManager;

#[derive(Clone)]
pub struct AppState {
    /// Account persistence.
    pub store: Arc<dyn UserStore>,
    /// External image storage.
    pub image_host: Arc<dyn ImageHost>,
    /// Session token issuing and verification.
    pub tokens: Arc<dyn TokenIssuer>,
    /// Registration and login component.
    pub credentials: CredentialManager,
    /// Photo add/set-main/delete component.
    pub photos: PhotoManager,
}

impl AppState {
    pub fn new(
        store: Arc<dyn UserStore>,
        image_host: Arc<dyn ImageHost>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        let credentials = CredentialManager::new(store.clone(), tokens.clone());
        let photos = PhotoManager::new(store.clone(), image_host.clone());
        Self {
            store,
            image_host,
            tokens,
            credentials,
            photos,
        }
    }
}

impl FromRef<AppState> for CredentialManager {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.credentials.clone()
    }
}

impl FromRef<AppState> for PhotoManager {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.photos.clone()
    }
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}
