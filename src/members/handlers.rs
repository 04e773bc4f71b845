/**
 * Member Directory Handlers
 *
 * HTTP handlers for browsing and updating member profiles.
 *
 * - `GET /api/users` - paged member listing with filters; pagination
 *   metadata travels in the `Pagination` response header
 * - `GET /api/users/{username}` - single member by username
 * - `PUT /api/users` - update the calling member's profile fields
 */

use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::members::model::Member;
use crate::members::pagination::MemberParams;
use crate::members::store::MemberQuery;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Profile fields a member may change after registration.
#[derive(Debug, Deserialize)]
pub struct MemberUpdateRequest {
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

fn opposite_gender(gender: &str) -> &'static str {
    if gender == "female" {
        "male"
    } else {
        "female"
    }
}

pub async fn list_members(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MemberParams>,
) -> Result<Response, AppError> {
    let caller = state
        .store
        .find_by_username(&user.username)
        .await?
        .ok_or_else(|| AppError::unauthorized("unknown account"))?;

    // With no explicit gender filter, show the opposite of the caller's.
    let gender = params
        .gender
        .clone()
        .unwrap_or_else(|| opposite_gender(&caller.gender).to_string());

    let page = state
        .store
        .list_members(&MemberQuery {
            exclude_username: caller.username,
            gender,
            min_age: params.min_age,
            max_age: params.max_age,
            order_by: params.order_by,
            page_number: params.clamped_page_number(),
            page_size: params.clamped_page_size(),
        })
        .await?;

    let header = serde_json::to_string(&page.header()).unwrap_or_default();
    let members: Vec<Member> = page.items.iter().map(Member::from).collect();

    let mut response = Json(members).into_response();
    if let Ok(value) = HeaderValue::from_str(&header) {
        response.headers_mut().insert("Pagination", value);
    }
    Ok(response)
}

pub async fn get_member(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Member>, AppError> {
    let username = username.to_lowercase();
    let account = state
        .store
        .find_by_username(&username)
        .await?
        .ok_or(AppError::MemberNotFound { username })?;

    Ok(Json(Member::from(&account)))
}

pub async fn update_member(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(update): Json<MemberUpdateRequest>,
) -> Result<StatusCode, AppError> {
    let mut account = state
        .store
        .find_by_username(&user.username)
        .await?
        .ok_or_else(|| AppError::unauthorized("unknown account"))?;

    if update.introduction.is_some() {
        account.introduction = update.introduction;
    }
    if update.looking_for.is_some() {
        account.looking_for = update.looking_for;
    }
    if update.interests.is_some() {
        account.interests = update.interests;
    }
    if let Some(city) = update.city {
        account.city = city;
    }
    if let Some(country) = update.country {
        account.country = country;
    }

    state.store.save(&account).await?;
    tracing::info!("updated profile for '{}'", account.username);
    Ok(StatusCode::NO_CONTENT)
}
