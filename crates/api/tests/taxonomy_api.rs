//! HTTP-level integration tests for tags, categories, and translations.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json_auth, seed_user, send_json_auth, token_for};
use sqlx::PgPool;

use mindscribe_core::types::DbId;

async fn create_post(pool: &PgPool, token: &str, title: &str) -> DbId {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": title, "content": "Body.", "status": "published" });
    let response = post_json_auth(app, "/api/v1/posts", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn attach_tag_creates_and_normalizes(pool: PgPool) {
    let author = seed_user(&pool, "tagger", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Tagged Post").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Rust" });
    let response = post_json_auth(app, &format!("/api/v1/posts/{post_id}/tags"), &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "rust");

    // Re-attaching the same name (different casing) reuses the tag.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "RUST" });
    let response = post_json_auth(app, &format!("/api/v1/posts/{post_id}/tags"), &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["name"], "rust");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}/tags")).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/tags").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn detach_missing_tag_is_not_found(pool: PgPool) {
    let author = seed_user(&pool, "detacher", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Untagged").await;

    let app = common::build_test_app(pool);
    let response = delete_auth(app, &format!("/api/v1/posts/{post_id}/tags/9999"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn posts_by_tag_only_lists_published(pool: PgPool) {
    let author = seed_user(&pool, "curator", "author").await;
    let token = token_for(&author);
    let published_id = create_post(&pool, &token, "Visible").await;

    // A draft carrying the same tag must not be listed.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": "Hidden", "content": "Draft body." });
    let response = post_json_auth(app, "/api/v1/posts", &token, body).await;
    let draft_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let mut tag_id = 0;
    for post_id in [published_id, draft_id] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({ "name": "shared" });
        let response =
            post_json_auth(app, &format!("/api/v1/posts/{post_id}/tags"), &token, body).await;
        tag_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/tags/{tag_id}/posts")).await).await;
    let posts = json["data"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], published_id);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_post_owner_may_attach_tags(pool: PgPool) {
    let author = seed_user(&pool, "possessive", "author").await;
    let other = seed_user(&pool, "outsider", "author").await;
    let post_id = create_post(&pool, &token_for(&author), "Private Garden").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "name": "graffiti" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{post_id}/tags"),
        &token_for(&other),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn categories_attach_and_detach(pool: PgPool) {
    let author = seed_user(&pool, "organizer", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Sorted").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "Technology" });
    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{post_id}/categories"),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let category_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/posts/{post_id}/categories/{category_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}/categories")).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Post translations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn translation_upsert_replaces_existing(pool: PgPool) {
    let author = seed_user(&pool, "polyglot", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Original").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "language": "fr", "title": "Originel", "content": "Premier." });
    let response = send_json_auth(
        app,
        "PUT",
        &format!("/api/v1/posts/{post_id}/translations"),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Upserting the same language overwrites rather than duplicating.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "language": "fr", "title": "Révisé", "content": "Second." });
    let response = send_json_auth(
        app,
        "PUT",
        &format!("/api/v1/posts/{post_id}/translations"),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}/translations")).await).await;
    let translations = json["data"].as_array().unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0]["title"], "Révisé");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/posts/{post_id}/translations/fr")).await).await;
    assert_eq!(json["data"]["content"], "Second.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn translation_in_source_language_is_rejected(pool: PgPool) {
    let author = seed_user(&pool, "redundant", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "English Post").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "language": "en", "title": "Same", "content": "Same." });
    let response = send_json_auth(
        app,
        "PUT",
        &format!("/api/v1/posts/{post_id}/translations"),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_translation_is_not_found(pool: PgPool) {
    let author = seed_user(&pool, "monoglot", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Untranslated").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/posts/{post_id}/translations/de")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Tag name translations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn tag_name_translations_round_trip(pool: PgPool) {
    let author = seed_user(&pool, "linguist", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Tag Host").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "name": "science" });
    let response = post_json_auth(app, &format!("/api/v1/posts/{post_id}/tags"), &token, body).await;
    let tag_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "language": "es", "name": "ciencia" });
    let response = send_json_auth(
        app,
        "PUT",
        &format!("/api/v1/tags/{tag_id}/translations"),
        &token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/tags/{tag_id}/translations")).await).await;
    let translations = json["data"].as_array().unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0]["name"], "ciencia");
    assert_eq!(translations[0]["language"], "es");
}
