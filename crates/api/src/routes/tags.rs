//! Route definitions for tags.

use axum::routing::get;
use axum::Router;

use crate::handlers::{taxonomy, translations};
use crate::state::AppState;

/// Tag routes mounted at `/tags`.
///
/// ```text
/// GET /                      -> list_tags
/// GET /{id}/posts            -> list_posts_for_tag (published only)
/// GET /{tag_id}/translations -> list_tag_translations
/// PUT /{tag_id}/translations -> upsert_tag_translation (author/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(taxonomy::list_tags))
        .route("/{id}/posts", get(taxonomy::list_posts_for_tag))
        .route(
            "/{tag_id}/translations",
            get(translations::list_tag_translations).put(translations::upsert_tag_translation),
        )
}
