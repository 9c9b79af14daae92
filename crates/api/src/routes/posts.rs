//! Route definitions for posts and everything scoped to one post.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{
    ai, collaboration, comments, polls, posts, quizzes, streams, taxonomy, translations,
};
use crate::state::AppState;

/// Post routes mounted at `/posts`.
///
/// ```text
/// GET    /                                 -> list_posts
/// POST   /                                 -> create_post (author/admin)
/// GET    /slug/{slug}                      -> get_post_by_slug
/// GET    /{id}                             -> get_post
/// PATCH  /{id}                             -> update_post (owner)
/// DELETE /{id}                             -> delete_post (owner)
/// POST   /{id}/publish                     -> publish_post (owner)
/// POST   /{id}/archive                     -> archive_post (owner)
/// POST   /{id}/like                        -> like_post
/// POST   /{id}/dislike                     -> dislike_post
/// POST   /{id}/view                        -> view_post
/// POST   /{id}/report                      -> report_post (authenticated)
/// PUT    /{id}/moderation                  -> set_moderation (admin)
///
/// GET    /{post_id}/comments               -> list_comments
/// POST   /{post_id}/comments               -> create_comment
///
/// GET    /{post_id}/tags                   -> list_post_tags
/// POST   /{post_id}/tags                   -> attach_tag (owner)
/// DELETE /{post_id}/tags/{tag_id}          -> detach_tag (owner)
/// GET    /{post_id}/categories             -> list_post_categories
/// POST   /{post_id}/categories             -> attach_category (owner)
/// DELETE /{post_id}/categories/{cat_id}    -> detach_category (owner)
///
/// GET    /{post_id}/translations           -> list_post_translations
/// PUT    /{post_id}/translations           -> upsert_post_translation (owner)
/// GET    /{post_id}/translations/{lang}    -> get_post_translation
/// DELETE /{post_id}/translations/{lang}    -> delete_post_translation (owner)
///
/// GET    /{post_id}/polls                  -> list_polls_for_post
/// GET    /{post_id}/quizzes                -> list_quizzes_for_post
/// GET    /{post_id}/streams                -> list_streams_for_post
///
/// GET    /{post_id}/invites                -> list_post_invites (owner)
/// GET    /{post_id}/collaborators          -> list_collaborators
/// DELETE /{post_id}/collaborators/{uid}    -> remove_collaborator
/// POST   /{post_id}/edits                  -> record_edit (writers)
/// GET    /{post_id}/versions               -> list_versions
/// GET    /{post_id}/versions/{version}     -> get_version
/// GET    /{post_id}/activity               -> list_post_activity
/// GET    /{post_id}/analyses               -> list_post_analyses (owner)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/slug/{slug}", get(posts::get_post_by_slug))
        .route(
            "/{id}",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/publish", post(posts::publish_post))
        .route("/{id}/archive", post(posts::archive_post))
        .route("/{id}/like", post(posts::like_post))
        .route("/{id}/dislike", post(posts::dislike_post))
        .route("/{id}/view", post(posts::view_post))
        .route("/{id}/report", post(posts::report_post))
        .route("/{id}/moderation", put(posts::set_moderation))
        // -- Comments --
        .route(
            "/{post_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        // -- Taxonomy --
        .route(
            "/{post_id}/tags",
            get(taxonomy::list_post_tags).post(taxonomy::attach_tag),
        )
        .route("/{post_id}/tags/{tag_id}", delete(taxonomy::detach_tag))
        .route(
            "/{post_id}/categories",
            get(taxonomy::list_post_categories).post(taxonomy::attach_category),
        )
        .route(
            "/{post_id}/categories/{category_id}",
            delete(taxonomy::detach_category),
        )
        // -- Translations --
        .route(
            "/{post_id}/translations",
            get(translations::list_post_translations).put(translations::upsert_post_translation),
        )
        .route(
            "/{post_id}/translations/{language}",
            get(translations::get_post_translation).delete(translations::delete_post_translation),
        )
        // -- Attached engagement features --
        .route("/{post_id}/polls", get(polls::list_polls_for_post))
        .route("/{post_id}/quizzes", get(quizzes::list_quizzes_for_post))
        .route("/{post_id}/streams", get(streams::list_streams_for_post))
        // -- Collaboration --
        .route("/{post_id}/invites", get(collaboration::list_post_invites))
        .route(
            "/{post_id}/collaborators",
            get(collaboration::list_collaborators),
        )
        .route(
            "/{post_id}/collaborators/{user_id}",
            delete(collaboration::remove_collaborator),
        )
        .route("/{post_id}/edits", post(collaboration::record_edit))
        .route("/{post_id}/versions", get(collaboration::list_versions))
        .route(
            "/{post_id}/versions/{version}",
            get(collaboration::get_version),
        )
        .route("/{post_id}/activity", get(collaboration::list_post_activity))
        // -- Assistant output --
        .route("/{post_id}/analyses", get(ai::list_post_analyses))
}
