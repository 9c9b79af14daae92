//! Handlers for comments, nested under `/posts/{post_id}/comments`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use mindscribe_core::content::validate_content;
use mindscribe_core::error::CoreError;
use mindscribe_core::roles::ROLE_ADMIN;
use mindscribe_core::types::DbId;
use mindscribe_db::models::comment::{Comment, CreateComment, UpdateComment};
use mindscribe_db::repositories::CommentRepo;
use mindscribe_events::{event_types, DomainEvent};

use super::posts::fetch_post;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/posts/{post_id}/comments
///
/// Any authenticated user may comment. The post's `comment_count` is
/// updated in the same transaction as the insert.
pub async fn create_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(post_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    validate_content(&input.content)?;
    fetch_post(&state, post_id).await?;

    let comment =
        CommentRepo::create(&state.pool, post_id, auth_user.user_id, &input.content).await?;

    state.event_bus.publish(
        DomainEvent::new(event_types::COMMENT_CREATED)
            .with_source("comment", comment.id)
            .with_actor(auth_user.user_id)
            .with_payload(serde_json::json!({ "post_id": post_id })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// GET /api/v1/posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Comment>>>> {
    fetch_post(&state, post_id).await?;
    let comments = CommentRepo::list_by_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// PATCH /api/v1/comments/{id}
///
/// Only the comment's author (or an admin) may edit it.
pub async fn update_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComment>,
) -> AppResult<Json<DataResponse<Comment>>> {
    validate_content(&input.content)?;

    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "comment",
            id,
        }))?;

    if comment.author_id != auth_user.user_id && auth_user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the comment author may edit it".into(),
        )));
    }

    let updated = CommentRepo::update(&state.pool, id, &input.content)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "comment",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/comments/{id}/like
pub async fn like_comment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = CommentRepo::increment_reaction(&state.pool, id, true)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "comment",
            id,
        }))?;
    Ok(Json(DataResponse { data: comment }))
}

/// POST /api/v1/comments/{id}/dislike
pub async fn dislike_comment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Comment>>> {
    let comment = CommentRepo::increment_reaction(&state.pool, id, false)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "comment",
            id,
        }))?;
    Ok(Json(DataResponse { data: comment }))
}

/// DELETE /api/v1/comments/{id}
///
/// Author or admin. Decrements the post's comment counter.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "comment",
            id,
        }))?;

    if comment.author_id != auth_user.user_id && auth_user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the comment author may delete it".into(),
        )));
    }

    CommentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
