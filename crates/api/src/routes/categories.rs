//! Route definitions for categories.

use axum::routing::get;
use axum::Router;

use crate::handlers::{taxonomy, translations};
use crate::state::AppState;

/// Category routes mounted at `/categories`.
///
/// ```text
/// GET /                           -> list_categories
/// GET /{category_id}/translations -> list_category_translations
/// PUT /{category_id}/translations -> upsert_category_translation (author/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(taxonomy::list_categories))
        .route(
            "/{category_id}/translations",
            get(translations::list_category_translations)
                .put(translations::upsert_category_translation),
        )
}
