//! Route definitions for polls.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::polls;
use crate::state::AppState;

/// Poll routes mounted at `/polls`.
///
/// ```text
/// POST   /            -> create_poll (post owner)
/// GET    /{id}        -> get_poll (with results)
/// DELETE /{id}        -> delete_poll (post owner)
/// POST   /{id}/vote   -> vote (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(polls::create_poll))
        .route("/{id}", get(polls::get_poll).delete(polls::delete_poll))
        .route("/{id}/vote", post(polls::vote))
}
