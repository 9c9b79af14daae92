//! Handlers for the `/posts` resource: CRUD, publishing lifecycle,
//! engagement counters, and moderation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use mindscribe_core::collaboration::activity_actions;
use mindscribe_core::content::{
    generate_slug, validate_content, validate_status, validate_title, STATUS_ARCHIVED,
    STATUS_DRAFT, STATUS_PUBLISHED,
};
use mindscribe_core::error::CoreError;
use mindscribe_core::roles::ROLE_ADMIN;
use mindscribe_core::translation::{validate_language, DEFAULT_LANGUAGE};
use mindscribe_core::types::DbId;
use mindscribe_db::models::post::{CreatePost, Post, UpdatePost};
use mindscribe_db::repositories::{ActivityRepo, PostRepo};
use mindscribe_events::{event_types, DomainEvent};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireAuthor};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /posts`.
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub status: Option<String>,
    pub author_id: Option<DbId>,
}

/// Request body for `POST /posts/{id}/moderation` (admin).
#[derive(Debug, Deserialize)]
pub struct ModerationRequest {
    pub flagged: bool,
    pub reason: Option<String>,
}

/// Request body for `POST /posts/{id}/report`.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub reason: String,
}

/// Fetch a post or fail with 404.
pub(crate) async fn fetch_post(state: &AppState, id: DbId) -> AppResult<Post> {
    PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))
}

/// Verify the caller owns the post or is an admin.
pub(crate) fn ensure_post_owner(post: &Post, user: &AuthUser) -> AppResult<()> {
    if post.author_id != user.user_id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the post author may do this".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/posts
///
/// Create a post. Requires the author or admin role. The slug is derived
/// from the title when not given; collisions get a numeric suffix.
pub async fn create_post(
    State(state): State<AppState>,
    RequireAuthor(user): RequireAuthor,
    Json(input): Json<CreatePost>,
) -> AppResult<(StatusCode, Json<DataResponse<Post>>)> {
    validate_title(&input.title)?;
    validate_content(&input.content)?;

    let language = input
        .language
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    validate_language(&language)?;

    let status = input.status.unwrap_or_else(|| STATUS_DRAFT.to_string());
    validate_status(&status)?;

    let slug = match input.slug {
        Some(s) if !s.trim().is_empty() => s,
        _ => resolve_slug(&state, &input.title).await?,
    };

    let post = PostRepo::create(
        &state.pool,
        user.user_id,
        &input.title,
        &slug,
        &input.content,
        &language,
        &status,
    )
    .await?;

    state.event_bus.publish(
        DomainEvent::new(event_types::POST_CREATED)
            .with_source("post", post.id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "title": post.title, "status": post.status })),
    );

    if post.status == STATUS_PUBLISHED {
        state.event_bus.publish(
            DomainEvent::new(event_types::POST_PUBLISHED)
                .with_source("post", post.id)
                .with_actor(user.user_id),
        );
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// GET /api/v1/posts
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsQuery>,
) -> AppResult<Json<DataResponse<Vec<Post>>>> {
    if let Some(status) = &params.status {
        validate_status(status)?;
    }
    let posts = PostRepo::list(&state.pool, params.status.as_deref(), params.author_id).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = fetch_post(&state, id).await?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /api/v1/posts/slug/{slug}
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No post with slug '{slug}'")))?;
    Ok(Json(DataResponse { data: post }))
}

/// PATCH /api/v1/posts/{id}
///
/// Direct edit by the author (or admin). Collaborative edits go through
/// the versioned `/posts/{id}/edits` endpoint instead.
pub async fn update_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = fetch_post(&state, id).await?;
    ensure_post_owner(&post, &auth_user)?;

    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(content) = &input.content {
        validate_content(content)?;
    }
    if let Some(language) = &input.language {
        validate_language(language)?;
    }
    if let Some(status) = &input.status {
        validate_status(status)?;
    }

    let was_published = post.status == STATUS_PUBLISHED;

    let updated = PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))?;

    if !was_published && updated.status == STATUS_PUBLISHED {
        state.event_bus.publish(
            DomainEvent::new(event_types::POST_PUBLISHED)
                .with_source("post", updated.id)
                .with_actor(auth_user.user_id),
        );
    }

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/posts/{id}/publish
pub async fn publish_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = fetch_post(&state, id).await?;
    ensure_post_owner(&post, &auth_user)?;

    if post.status == STATUS_PUBLISHED {
        return Err(AppError::Core(CoreError::Conflict(
            "Post is already published".into(),
        )));
    }

    let updated = PostRepo::set_status(&state.pool, id, STATUS_PUBLISHED)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))?;

    state.event_bus.publish(
        DomainEvent::new(event_types::POST_PUBLISHED)
            .with_source("post", updated.id)
            .with_actor(auth_user.user_id),
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/posts/{id}/archive
pub async fn archive_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = fetch_post(&state, id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let updated = PostRepo::set_status(&state.pool, id, STATUS_ARCHIVED)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/posts/{id}/like
///
/// Anonymous engagement counter; no per-user dedup by design.
pub async fn like_post(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::increment_likes(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))?;

    // Anonymous likes only move the counter; signed-in likes also reach
    // the activity log.
    if let Some(user) = &user {
        ActivityRepo::append(
            &state.pool,
            id,
            user.user_id,
            activity_actions::LIKED,
            serde_json::json!({ "likes": post.likes }),
        )
        .await?;
    }

    let mut event = DomainEvent::new(event_types::POST_LIKED)
        .with_source("post", post.id)
        .with_payload(serde_json::json!({ "likes": post.likes }));
    if let Some(user) = &user {
        event = event.with_actor(user.user_id);
    }
    state.event_bus.publish(event);

    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/posts/{id}/dislike
pub async fn dislike_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::increment_dislikes(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/posts/{id}/view
pub async fn view_post(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::increment_views(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))?;
    Ok(Json(DataResponse { data: post }))
}

/// PUT /api/v1/posts/{id}/moderation (admin)
pub async fn set_moderation(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ModerationRequest>,
) -> AppResult<Json<DataResponse<Post>>> {
    let post = PostRepo::set_moderation(&state.pool, id, input.flagged, input.reason.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/posts/{id}/report
///
/// Any signed-in user can report a post. Flags the post for moderation
/// and records who reported it in the activity log, atomically.
pub async fn report_post(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<ReportRequest>,
) -> AppResult<Json<DataResponse<Post>>> {
    if input.reason.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Report reason must not be empty".into(),
        )));
    }

    let post = PostRepo::report(&state.pool, id, user.user_id, &input.reason)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "post", id }))?;

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let post = fetch_post(&state, id).await?;
    ensure_post_owner(&post, &auth_user)?;

    PostRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Derive a unique slug from a title, suffixing `-2`, `-3`, ... on collision.
async fn resolve_slug(state: &AppState, title: &str) -> AppResult<String> {
    let base = generate_slug(title);
    if base.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Title does not produce a usable slug".into(),
        )));
    }

    if !PostRepo::slug_exists(&state.pool, &base).await? {
        return Ok(base);
    }
    for n in 2..100 {
        let candidate = format!("{base}-{n}");
        if !PostRepo::slug_exists(&state.pool, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::Core(CoreError::Conflict(format!(
        "Could not find a free slug for '{base}'"
    ))))
}
