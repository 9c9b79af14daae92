pub mod ai;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod invites;
pub mod polls;
pub mod posts;
pub mod quizzes;
pub mod streams;
pub mod tags;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
///
/// /users/me                              profile get, patch
/// /users/me/password                     change password (PUT)
/// /users/me/activity                     own collaboration activity
/// /users                                 list (admin only)
/// /users/{id}                            public profile
/// /users/{id}/activate                   reactivate account (admin, POST)
/// /users/{id}/deactivate                 deactivate account (admin, POST)
///
/// /posts                                 list, create
/// /posts/slug/{slug}                     lookup by slug
/// /posts/{id}                            get, patch, delete
/// /posts/{id}/publish|archive            status transitions (POST)
/// /posts/{id}/like|dislike|view          engagement counters (POST)
/// /posts/{id}/report                     flag for moderation (POST, authed)
/// /posts/{id}/moderation                 admin moderation flag (PUT)
/// /posts/{id}/comments                   list, create
/// /posts/{id}/tags                       list, attach; /{tag_id} detach
/// /posts/{id}/categories                 list, attach; /{category_id} detach
/// /posts/{id}/translations               list, upsert; /{language} get, delete
/// /posts/{id}/polls                      polls on a post
/// /posts/{id}/quizzes                    quizzes on a post
/// /posts/{id}/streams                    stream metadata on a post
/// /posts/{id}/invites                    invites sent for a post
/// /posts/{id}/collaborators              membership list; /{user_id} remove
/// /posts/{id}/edits                      record a versioned edit (POST)
/// /posts/{id}/versions                   snapshots; /{version} single snapshot
/// /posts/{id}/activity                   collaboration audit trail
/// /posts/{id}/analyses                   stored assistant analyses
///
/// /comments/{id}                         patch, delete
/// /comments/{id}/like|dislike            reaction counters (POST)
///
/// /tags                                  list
/// /tags/{id}/posts                       published posts by tag
/// /tags/{id}/translations                list, upsert name translations
///
/// /categories                            list
/// /categories/{id}/translations          list, upsert name translations
///
/// /polls                                 create
/// /polls/{id}                            results, delete
/// /polls/{id}/vote                       cast a vote (POST)
///
/// /quizzes                               create
/// /quizzes/{id}                          get, delete
/// /quizzes/{id}/submit                   submit an answer (POST)
/// /quizzes/{id}/submissions              all submissions (owner only)
/// /quizzes/{id}/my-submission            caller's submission
///
/// /streams                               create
/// /streams/live                          currently live streams
/// /streams/{id}                          get, patch, delete
/// /streams/{id}/start|end                live-state transitions (POST)
///
/// /invites                               list own, create
/// /invites/{id}/respond                  accept or reject (POST)
///
/// /ai/suggest-topics                     topic suggestions (POST)
/// /ai/suggestions                        stored suggestions
/// /ai/suggestions/{id}/use               mark suggestion used (POST)
/// /ai/analyze                            content analysis (POST)
/// /ai/improve                            content improvement (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .nest("/comments", comments::router())
        .nest("/tags", tags::router())
        .nest("/categories", categories::router())
        .nest("/polls", polls::router())
        .nest("/quizzes", quizzes::router())
        .nest("/streams", streams::router())
        .nest("/invites", invites::router())
        .nest("/ai", ai::router())
}
