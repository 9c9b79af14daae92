//! HTTP-level integration tests for registration, login, token refresh,
//! and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_json_auth, seed_user, TEST_PASSWORD};
use sqlx::PgPool;

/// Log in via the API and return the JSON auth response.
async fn login(app: axum::Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_creates_account_with_author_default(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "freshwriter",
        "email": "freshwriter@test.com",
        "password": "a-long-enough-password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "freshwriter");
    assert_eq!(json["data"]["role"], "author");
    assert_eq!(json["data"]["preferred_language"], "en");
    // The password hash must never appear in the response.
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    seed_user(&pool, "original", "author").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "copycat",
        "email": "original@test.com",
        "password": "a-long-enough-password",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_short_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "hasty",
        "email": "hasty@test.com",
        "password": "short",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_tokens_and_user_info(pool: PgPool) {
    let user = seed_user(&pool, "loginuser", "author").await;
    let app = common::build_test_app(pool);

    let json = login(app, "loginuser@test.com", TEST_PASSWORD).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "author");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_is_unauthorized(pool: PgPool) {
    seed_user(&pool, "wrongpw", "author").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "wrongpw@test.com", "password": "incorrect" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_deactivated_account_is_forbidden(pool: PgPool) {
    let user = seed_user(&pool, "inactive", "author").await;
    mindscribe_db::repositories::UserRepo::set_active(&pool, user.id, false)
        .await
        .expect("deactivation should succeed");
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "inactive@test.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Refresh rotation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_and_invalidates_old_token(pool: PgPool) {
    seed_user(&pool, "rotator", "author").await;
    let app = common::build_test_app(pool.clone());

    let login_json = login(app, "rotator@test.com", TEST_PASSWORD).await;
    let old_refresh = login_json["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and yields a new pair.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let new_refresh = json["refresh_token"].as_str().unwrap();
    assert_ne!(new_refresh, old_refresh, "refresh token must rotate");

    // Replaying the consumed token fails.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_with_garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": "not-a-real-token" });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_all_sessions(pool: PgPool) {
    let user = seed_user(&pool, "leaver", "author").await;
    let app = common::build_test_app(pool.clone());

    let login_json = login(app, "leaver@test.com", TEST_PASSWORD).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    let token = common::token_for(&user);
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/auth/logout", &token, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token from before logout no longer works.
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
