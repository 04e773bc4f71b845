/**
 * Profile Photo Manager
 *
 * Maintains the main-photo invariant across add, set-main and delete:
 * at most one photo is main, and exactly one whenever the account owns
 * any photos at all.
 *
 * Every operation validates first, mutates the in-memory account second
 * and persists once at the end, so no observer can see an intermediate
 * state with two main photos or a missing one. A hosting-collaborator
 * failure aborts before any local mutation.
 */

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use crate::error::AppError;
use crate::members::model::{Account, Photo};
use crate::members::store::UserStore;
use crate::photos::hosting::ImageHost;

#[derive(Clone)]
pub struct PhotoManager {
    store: Arc<dyn UserStore>,
    host: Arc<dyn ImageHost>,
}

impl PhotoManager {
    pub fn new(store: Arc<dyn UserStore>, host: Arc<dyn ImageHost>) -> Self {
        Self { store, host }
    }

    /// Upload an image and attach the resulting photo to the account.
    ///
    /// The account's first photo is created in the main state; later
    /// photos are created not-main and never disturb the existing main.
    pub async fn add_photo(&self, account: &mut Account, image: Bytes) -> Result<Photo, AppError> {
        let hosted = self.host.upload(image).await.map_err(|e| {
            tracing::warn!("upload failed for '{}': {e}", account.username);
            AppError::Upload {
                message: e.to_string(),
            }
        })?;

        let is_first = account.photos.is_empty();
        let photo = Photo::new(hosted.url, Some(hosted.storage_id), is_first);
        account.photos.push(photo.clone());
        debug_assert!(account.main_photo_count() <= 1);

        self.store.save(account).await?;
        tracing::info!(
            "added photo {} for '{}' (main: {})",
            photo.id,
            account.username,
            photo.is_main
        );
        Ok(photo)
    }

    /// Make `photo_id` the account's main photo.
    ///
    /// Clearing the old main and setting the new one happen as one paired
    /// transition on the in-memory account followed by a single save.
    pub async fn set_main_photo(
        &self,
        account: &mut Account,
        photo_id: Uuid,
    ) -> Result<(), AppError> {
        match account.photo(photo_id) {
            None => return Err(AppError::PhotoNotFound { photo_id }),
            Some(photo) if photo.is_main => return Err(AppError::AlreadyMain),
            Some(_) => {}
        }

        for photo in &mut account.photos {
            photo.is_main = photo.id == photo_id;
        }
        debug_assert!(account.main_photo_count() == 1);

        self.store.save(account).await?;
        tracing::info!("photo {photo_id} is now main for '{}'", account.username);
        Ok(())
    }

    /// Delete a non-main photo, remote copy first.
    ///
    /// A hosting-backend failure aborts the operation with the local
    /// photo set unchanged.
    pub async fn delete_photo(
        &self,
        account: &mut Account,
        photo_id: Uuid,
    ) -> Result<(), AppError> {
        let (is_main, storage_id) = match account.photo(photo_id) {
            None => return Err(AppError::PhotoNotFound { photo_id }),
            Some(photo) => (photo.is_main, photo.storage_id.clone()),
        };
        if is_main {
            return Err(AppError::CannotDeleteMain);
        }

        if let Some(storage_id) = storage_id {
            self.host.delete(&storage_id).await.map_err(|e| {
                tracing::warn!("remote delete of {storage_id} failed: {e}");
                AppError::DeletionBackend {
                    message: e.to_string(),
                }
            })?;
        }

        account.photos.retain(|p| p.id != photo_id);
        self.store.save(account).await?;
        tracing::info!("deleted photo {photo_id} for '{}'", account.username);
        Ok(())
    }
}
