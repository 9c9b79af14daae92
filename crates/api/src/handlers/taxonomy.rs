//! Handlers for tags and categories, including per-post attachment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use mindscribe_core::content::validate_name;
use mindscribe_core::error::CoreError;
use mindscribe_core::types::DbId;
use mindscribe_db::models::post::Post;
use mindscribe_db::models::taxonomy::{Category, NameRequest, Tag};
use mindscribe_db::repositories::{CategoryRepo, PostRepo, TagRepo};

use super::posts::{ensure_post_owner, fetch_post};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// GET /api/v1/tags
pub async fn list_tags(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// GET /api/v1/tags/{id}/posts
///
/// Published posts carrying the tag, newest first.
pub async fn list_posts_for_tag(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "tag", id }))?;

    let posts = PostRepo::list_published_by_tag(&state.pool, id).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// POST /api/v1/posts/{post_id}/tags
///
/// Attach a tag by name, creating the tag on first use. Idempotent.
pub async fn attach_tag(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(post_id): Path<DbId>,
    Json(input): Json<NameRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Tag>>)> {
    validate_name(&input.name)?;

    let post = fetch_post(&state, post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let tag = TagRepo::get_or_create(&state.pool, &input.name).await?;
    TagRepo::attach(&state.pool, post_id, tag.id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}

/// GET /api/v1/posts/{post_id}/tags
pub async fn list_post_tags(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Tag>>>> {
    fetch_post(&state, post_id).await?;
    let tags = TagRepo::list_for_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// DELETE /api/v1/posts/{post_id}/tags/{tag_id}
pub async fn detach_tag(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((post_id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let post = fetch_post(&state, post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let removed = TagRepo::detach(&state.pool, post_id, tag_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "post tag",
            id: tag_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/posts/{post_id}/categories
pub async fn attach_category(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(post_id): Path<DbId>,
    Json(input): Json<NameRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    validate_name(&input.name)?;

    let post = fetch_post(&state, post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let category = CategoryRepo::get_or_create(&state.pool, &input.name).await?;
    CategoryRepo::attach(&state.pool, post_id, category.id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/posts/{post_id}/categories
pub async fn list_post_categories(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    fetch_post(&state, post_id).await?;
    let categories = CategoryRepo::list_for_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// DELETE /api/v1/posts/{post_id}/categories/{category_id}
pub async fn detach_category(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((post_id, category_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let post = fetch_post(&state, post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let removed = CategoryRepo::detach(&state.pool, post_id, category_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "post category",
            id: category_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
