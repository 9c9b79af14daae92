//! Route definitions for live-stream metadata.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::streams;
use crate::state::AppState;

/// Stream routes mounted at `/streams`.
///
/// ```text
/// POST   /             -> create_stream (author/admin)
/// GET    /live         -> list_live_streams
/// GET    /{id}         -> get_stream
/// PATCH  /{id}         -> update_stream (host/owner)
/// DELETE /{id}         -> delete_stream (host/owner)
/// POST   /{id}/start   -> start_stream (host/owner)
/// POST   /{id}/end     -> end_stream (host/owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(streams::create_stream))
        .route("/live", get(streams::list_live_streams))
        .route(
            "/{id}",
            get(streams::get_stream)
                .patch(streams::update_stream)
                .delete(streams::delete_stream),
        )
        .route("/{id}/start", post(streams::start_stream))
        .route("/{id}/end", post(streams::end_stream))
}
