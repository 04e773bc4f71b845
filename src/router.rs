/**
 * Router Configuration
 *
 * Assembles the route table:
 *
 * - `POST /api/account/register` - public
 * - `POST /api/account/login` - public
 * - `GET  /api/users` / `PUT /api/users` - protected
 * - `GET  /api/users/{username}` - protected
 * - `POST /api/users/add-photo` - protected
 * - `PUT  /api/users/set-main-photo/{photo_id}` - protected
 * - `DELETE /api/users/delete-photo/{photo_id}` - protected
 *
 * Protected routes sit behind the bearer-token middleware. Unknown paths
 * fall through to a 404 handler.
 */

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::handlers::{login, register};
use crate::members::handlers::{get_member, list_members, update_member};
use crate::middleware::auth_middleware;
use crate::photos::handlers::{add_photo, delete_photo, set_main_photo};
use crate::state::AppState;

/// Create the Axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/users", get(list_members).put(update_member))
        .route("/api/users/{username}", get(get_member))
        .route("/api/users/add-photo", post(add_photo))
        .route("/api/users/set-main-photo/{photo_id}", put(set_main_photo))
        .route("/api/users/delete-photo/{photo_id}", delete(delete_photo))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/api/account/register", post(register))
        .route("/api/account/login", post(login))
        .merge(protected)
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
