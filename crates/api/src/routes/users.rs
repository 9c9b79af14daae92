//! Route definitions for user accounts and profiles.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{collaboration, users};
use crate::state::AppState;

/// User routes mounted at `/users`.
///
/// ```text
/// GET   /                  -> list_users (admin only)
/// GET   /me                -> get_me
/// PATCH /me                -> update_me
/// PUT   /me/password       -> change_password
/// GET   /me/activity       -> list_my_activity
/// GET   /{id}              -> get_user
/// POST  /{id}/activate     -> activate_user (admin only)
/// POST  /{id}/deactivate   -> deactivate_user (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/me", get(users::get_me).patch(users::update_me))
        .route("/me/password", put(users::change_password))
        .route("/me/activity", get(collaboration::list_my_activity))
        .route("/{id}", get(users::get_user))
        .route("/{id}/activate", post(users::activate_user))
        .route("/{id}/deactivate", post(users::deactivate_user))
}
