/**
 * Photo Handlers
 *
 * HTTP handlers for profile-photo management. Each handler loads the
 * calling member's account, delegates to the photo manager and persists
 * through it.
 *
 * - `POST /api/users/add-photo` - raw image bytes in the request body
 * - `PUT /api/users/set-main-photo/{photo_id}`
 * - `DELETE /api/users/delete-photo/{photo_id}`
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use bytes::Bytes;
use uuid::Uuid;

use crate::error::AppError;
use crate::members::model::{Account, Photo};
use crate::middleware::AuthUser;
use crate::state::AppState;

async fn load_account(state: &AppState, username: &str) -> Result<Account, AppError> {
    state
        .store
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::unauthorized("unknown account"))
}

pub async fn add_photo(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    image: Bytes,
) -> Result<(StatusCode, Json<Photo>), AppError> {
    if image.is_empty() {
        return Err(AppError::validation("image body is empty"));
    }
    tracing::info!(
        "photo upload from '{}' ({} bytes)",
        user.username,
        image.len()
    );

    let mut account = load_account(&state, &user.username).await?;
    let photo = state.photos.add_photo(&mut account, image).await?;

    Ok((StatusCode::CREATED, Json(photo)))
}

pub async fn set_main_photo(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut account = load_account(&state, &user.username).await?;
    state.photos.set_main_photo(&mut account, photo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_photo(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(photo_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut account = load_account(&state, &user.username).await?;
    state.photos.delete_photo(&mut account, photo_id).await?;
    Ok(StatusCode::OK)
}
