//! HTTP-level integration tests for posts, comments, and engagement
//! counters.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, post_auth, post_json, post_json_auth, seed_user, send_json_auth,
    token_for,
};
use sqlx::PgPool;

use mindscribe_core::types::DbId;

/// Create a post via the API and return its id.
async fn create_post(pool: &PgPool, token: &str, title: &str) -> DbId {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": title, "content": "Some body text." });
    let response = post_json_auth(app, "/api/v1/posts", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// CRUD and slugs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_post_generates_slug_from_title(pool: PgPool) {
    let author = seed_user(&pool, "slugger", "author").await;
    let token = token_for(&author);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "title": "Hello, World!", "content": "First post." });
    let response = post_json_auth(app, "/api/v1/posts", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "hello-world");
    assert_eq!(json["data"]["status"], "draft");
    assert_eq!(json["data"]["likes"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_titles_get_suffixed_slugs(pool: PgPool) {
    let author = seed_user(&pool, "repeater", "author").await;
    let token = token_for(&author);

    create_post(&pool, &token, "Same Title").await;
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "title": "Same Title", "content": "Again." });
    let response = post_json_auth(app, "/api/v1/posts", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "same-title-2");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reader_cannot_create_posts(pool: PgPool) {
    let reader = seed_user(&pool, "justreads", "reader").await;
    let token = token_for(&reader);
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "title": "Nope", "content": "Not allowed." });
    let response = post_json_auth(app, "/api/v1/posts", &token, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn lookup_by_slug(pool: PgPool) {
    let author = seed_user(&pool, "finder", "author").await;
    let token = token_for(&author);
    create_post(&pool, &token, "Findable Post").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/posts/slug/findable-post").await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/posts/slug/missing-slug").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_owner_or_admin_can_update(pool: PgPool) {
    let author = seed_user(&pool, "owner", "author").await;
    let interloper = seed_user(&pool, "interloper", "author").await;
    let admin = seed_user(&pool, "moderator", "admin").await;
    let post_id = create_post(&pool, &token_for(&author), "Mine").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "content": "hijacked" });
    let response = send_json_auth(
        app,
        "PATCH",
        &format!("/api/v1/posts/{post_id}"),
        &token_for(&interloper),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "content": "moderated" });
    let response = send_json_auth(
        app,
        "PATCH",
        &format!("/api/v1/posts/{post_id}"),
        &token_for(&admin),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Publishing lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn publish_then_republish_conflicts(pool: PgPool) {
    let author = seed_user(&pool, "publisher", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Going Live").await;

    let app = common::build_test_app(pool.clone());
    let response = post_auth(app, &format!("/api/v1/posts/{post_id}/publish"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "published");

    let app = common::build_test_app(pool);
    let response = post_auth(app, &format!("/api/v1/posts/{post_id}/publish"), &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Engagement counters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn likes_and_views_accumulate(pool: PgPool) {
    let author = seed_user(&pool, "popular", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Crowd Pleaser").await;

    for _ in 0..3 {
        let app = common::build_test_app(pool.clone());
        let response = common::post(app, &format!("/api/v1/posts/{post_id}/like")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    let app = common::build_test_app(pool.clone());
    common::post(app, &format!("/api/v1/posts/{post_id}/view")).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}")).await).await;
    assert_eq!(json["data"]["likes"], 3);
    assert_eq!(json["data"]["views"], 1);
    assert_eq!(json["data"]["dislikes"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn signed_in_likes_land_in_the_activity_log(pool: PgPool) {
    let author = seed_user(&pool, "liked", "author").await;
    let fan = seed_user(&pool, "admirer", "reader").await;
    let post_id = create_post(&pool, &token_for(&author), "Well Received").await;

    // Anonymous like: counter only.
    let app = common::build_test_app(pool.clone());
    let response = common::post(app, &format!("/api/v1/posts/{post_id}/like")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}/activity")).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // Signed-in like: counter plus an attributed activity entry.
    let app = common::build_test_app(pool.clone());
    let response = post_auth(
        app,
        &format!("/api/v1/posts/{post_id}/like"),
        &token_for(&fan),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["likes"], 2);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}/activity")).await).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "liked");
    assert_eq!(entries[0]["user_id"], fan.id);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn comments_adjust_post_counter(pool: PgPool) {
    let author = seed_user(&pool, "host", "author").await;
    let commenter = seed_user(&pool, "talker", "reader").await;
    let post_id = create_post(&pool, &token_for(&author), "Discuss").await;
    let token = token_for(&commenter);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "content": "Great read!" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{post_id}/comments"),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let comment_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}")).await).await;
    assert_eq!(json["data"]["comment_count"], 1);

    // Deleting the comment brings the counter back down.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/comments/{comment_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}")).await).await;
    assert_eq!(json["data"]["comment_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_comment_author_may_edit(pool: PgPool) {
    let author = seed_user(&pool, "blogger", "author").await;
    let commenter = seed_user(&pool, "friendly", "reader").await;
    let stranger = seed_user(&pool, "stranger", "reader").await;
    let post_id = create_post(&pool, &token_for(&author), "Guarded").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "content": "original comment" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{post_id}/comments"),
        &token_for(&commenter),
        body,
    )
    .await;
    let comment_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "content": "defaced" });
    let response = send_json_auth(
        app,
        "PATCH",
        &format!("/api/v1/comments/{comment_id}"),
        &token_for(&stranger),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn moderation_is_admin_only(pool: PgPool) {
    let author = seed_user(&pool, "flagged", "author").await;
    let admin = seed_user(&pool, "sheriff", "admin").await;
    let post_id = create_post(&pool, &token_for(&author), "Edgy Take").await;

    let body = serde_json::json!({ "flagged": true, "reason": "spam" });
    let app = common::build_test_app(pool.clone());
    let response = send_json_auth(
        app,
        "PUT",
        &format!("/api/v1/posts/{post_id}/moderation"),
        &token_for(&author),
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = send_json_auth(
        app,
        "PUT",
        &format!("/api/v1/posts/{post_id}/moderation"),
        &token_for(&admin),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["moderation_flagged"], true);
    assert_eq!(json["data"]["moderation_reason"], "spam");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn any_signed_in_user_may_report_a_post(pool: PgPool) {
    let author = seed_user(&pool, "provoker", "author").await;
    let reporter = seed_user(&pool, "concerned", "reader").await;
    let post_id = create_post(&pool, &token_for(&author), "Questionable").await;

    let body = serde_json::json!({ "reason": "misleading claims" });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{post_id}/report"),
        &token_for(&reporter),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["moderation_flagged"], true);
    assert_eq!(json["data"]["moderation_reason"], "misleading claims");

    // The report shows up in the post's activity log with the reporter.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}/activity")).await).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "reported");
    assert_eq!(entries[0]["user_id"], reporter.id);
    assert_eq!(entries[0]["detail"]["reason"], "misleading claims");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn report_requires_auth_and_a_reason(pool: PgPool) {
    let author = seed_user(&pool, "target", "author").await;
    let reader = seed_user(&pool, "hasty", "reader").await;
    let post_id = create_post(&pool, &token_for(&author), "Untouched").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "reason": "anything" });
    let response = post_json(app, &format!("/api/v1/posts/{post_id}/report"), body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "reason": "   " });
    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{post_id}/report"),
        &token_for(&reader),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "reason": "nothing here" });
    let response = post_json_auth(app, "/api/v1/posts/999/report", &token_for(&reader), body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The failed attempts left the post unflagged.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}")).await).await;
    assert_eq!(json["data"]["moderation_flagged"], false);
}
