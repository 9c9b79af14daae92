//! HTTP-level integration tests for polls and quizzes.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json_auth, seed_user, token_for};
use sqlx::PgPool;

use mindscribe_core::types::DbId;

async fn create_post(pool: &PgPool, token: &str, title: &str) -> DbId {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "title": title, "content": "Body." });
    let response = post_json_auth(app, "/api/v1/posts", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Polls
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn poll_create_and_vote(pool: PgPool) {
    let author = seed_user(&pool, "pollster", "author").await;
    let voter = seed_user(&pool, "voter", "reader").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Opinion Piece").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "post_id": post_id,
        "question": "Tabs or spaces?",
        "choices": ["Tabs", "Spaces"],
        "ends_on": "2030-01-01",
    });
    let response = post_json_auth(app, "/api/v1/polls", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let poll_id = json["data"]["id"].as_i64().unwrap();
    let choice_id = json["data"]["choices"][1]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["choices"][1]["votes"], 0);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "choice_id": choice_id });
    let response = post_json_auth(
        app,
        &format!("/api/v1/polls/{poll_id}/vote"),
        &token_for(&voter),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["votes"], 1);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/polls/{poll_id}")).await).await;
    assert_eq!(json["data"]["choices"][1]["votes"], 1);
    assert_eq!(json["data"]["choices"][0]["votes"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn poll_requires_at_least_two_choices(pool: PgPool) {
    let author = seed_user(&pool, "lonely", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "One Sided").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "post_id": post_id,
        "question": "Agree?",
        "choices": ["Yes"],
        "ends_on": "2030-01-01",
    });
    let response = post_json_auth(app, "/api/v1/polls", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn poll_end_date_must_be_future(pool: PgPool) {
    let author = seed_user(&pool, "backdater", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Too Late").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "post_id": post_id,
        "question": "Old news?",
        "choices": ["Yes", "No"],
        "ends_on": "2020-01-01",
    });
    let response = post_json_auth(app, "/api/v1/polls", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn closed_poll_rejects_votes(pool: PgPool) {
    let author = seed_user(&pool, "closer", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Yesterday's Question").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "post_id": post_id,
        "question": "Still open?",
        "choices": ["Yes", "No"],
        "ends_on": "2030-01-01",
    });
    let response = post_json_auth(app, "/api/v1/polls", &token, body).await;
    let json = body_json(response).await;
    let poll_id = json["data"]["id"].as_i64().unwrap();
    let choice_id = json["data"]["choices"][0]["id"].as_i64().unwrap();

    // Force the poll into the past; closing is evaluated lazily.
    sqlx::query("UPDATE polls SET ends_on = '2020-01-01' WHERE id = $1")
        .bind(poll_id)
        .execute(&pool)
        .await
        .expect("backdating should succeed");

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "choice_id": choice_id });
    let response =
        post_json_auth(app, &format!("/api/v1/polls/{poll_id}/vote"), &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn vote_with_foreign_choice_is_not_found(pool: PgPool) {
    let author = seed_user(&pool, "crosser", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Two Polls").await;

    let mut ids = Vec::new();
    for question in ["First?", "Second?"] {
        let app = common::build_test_app(pool.clone());
        let body = serde_json::json!({
            "post_id": post_id,
            "question": question,
            "choices": ["A", "B"],
            "ends_on": "2030-01-01",
        });
        let response = post_json_auth(app, "/api/v1/polls", &token, body).await;
        let json = body_json(response).await;
        ids.push((
            json["data"]["id"].as_i64().unwrap(),
            json["data"]["choices"][0]["id"].as_i64().unwrap(),
        ));
    }

    // A choice belonging to the second poll cannot be voted through the first.
    let (first_poll, _) = ids[0];
    let (_, second_choice) = ids[1];
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "choice_id": second_choice });
    let response =
        post_json_auth(app, &format!("/api/v1/polls/{first_poll}/vote"), &token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Quizzes
// ---------------------------------------------------------------------------

/// Create a quiz with "Right" (correct) and "Wrong" choices; returns
/// (quiz_id, right_choice_id, wrong_choice_id).
async fn create_quiz(pool: &PgPool, token: &str, post_id: DbId) -> (DbId, DbId, DbId) {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "post_id": post_id,
        "question": "Which one?",
        "choices": [
            { "choice_text": "Right", "is_correct": true },
            { "choice_text": "Wrong", "is_correct": false },
        ],
        "ends_on": "2030-01-01",
    });
    let response = post_json_auth(app, "/api/v1/quizzes", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["id"].as_i64().unwrap(),
        json["data"]["choices"][0]["id"].as_i64().unwrap(),
        json["data"]["choices"][1]["id"].as_i64().unwrap(),
    )
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quiz_requires_exactly_one_correct_choice(pool: PgPool) {
    let author = seed_user(&pool, "quizzer", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Pop Quiz").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "post_id": post_id,
        "question": "All of the above?",
        "choices": [
            { "choice_text": "A", "is_correct": true },
            { "choice_text": "B", "is_correct": true },
        ],
        "ends_on": "2030-01-01",
    });
    let response = post_json_auth(app, "/api/v1/quizzes", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quiz_answers_never_leak_to_clients(pool: PgPool) {
    let author = seed_user(&pool, "secretive", "author").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Hidden Key").await;
    let (quiz_id, _, _) = create_quiz(&pool, &token, post_id).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/quizzes/{quiz_id}")).await).await;
    for choice in json["data"]["choices"].as_array().unwrap() {
        assert!(choice.get("is_correct").is_none(), "answer flag leaked");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn quiz_submission_is_graded_and_unique(pool: PgPool) {
    let author = seed_user(&pool, "grader", "author").await;
    let student = seed_user(&pool, "pupil", "reader").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Graded Quiz").await;
    let (quiz_id, right_id, wrong_id) = create_quiz(&pool, &token, post_id).await;
    let student_token = token_for(&student);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "choice_id": right_id });
    let response = post_json_auth(
        app,
        &format!("/api/v1/quizzes/{quiz_id}/submit"),
        &student_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["is_correct"], true);

    // Second attempt, even with a different choice, conflicts.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "choice_id": wrong_id });
    let response = post_json_auth(
        app,
        &format!("/api/v1/quizzes/{quiz_id}/submit"),
        &student_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(
            app,
            &format!("/api/v1/quizzes/{quiz_id}/my-submission"),
            &student_token,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["choice_id"], right_id);
    assert_eq!(json["data"]["is_correct"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_answer_is_graded_incorrect(pool: PgPool) {
    let author = seed_user(&pool, "strict", "author").await;
    let student = seed_user(&pool, "guesser", "reader").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Tricky Quiz").await;
    let (quiz_id, _, wrong_id) = create_quiz(&pool, &token, post_id).await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "choice_id": wrong_id });
    let response = post_json_auth(
        app,
        &format!("/api/v1/quizzes/{quiz_id}/submit"),
        &token_for(&student),
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["is_correct"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn submissions_visible_to_quiz_owner_only(pool: PgPool) {
    let author = seed_user(&pool, "examiner", "author").await;
    let student = seed_user(&pool, "candidate", "reader").await;
    let token = token_for(&author);
    let post_id = create_post(&pool, &token, "Proctored").await;
    let (quiz_id, right_id, _) = create_quiz(&pool, &token, post_id).await;
    let student_token = token_for(&student);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "choice_id": right_id });
    post_json_auth(
        app,
        &format!("/api/v1/quizzes/{quiz_id}/submit"),
        &student_token,
        body,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/quizzes/{quiz_id}/submissions"),
        &student_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response =
        get_auth(app, &format!("/api/v1/quizzes/{quiz_id}/submissions"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
