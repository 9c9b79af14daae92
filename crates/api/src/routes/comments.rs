//! Route definitions for comment-level operations.
//!
//! Creation and listing live under `/posts/{post_id}/comments`; this
//! router covers operations addressed by comment id.

use axum::routing::post;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Comment routes mounted at `/comments`.
///
/// ```text
/// PATCH  /{id}          -> update_comment (author/admin)
/// DELETE /{id}          -> delete_comment (author/admin)
/// POST   /{id}/like     -> like_comment
/// POST   /{id}/dislike  -> dislike_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            axum::routing::patch(comments::update_comment).delete(comments::delete_comment),
        )
        .route("/{id}/like", post(comments::like_comment))
        .route("/{id}/dislike", post(comments::dislike_comment))
}
