//! Handlers for live-stream metadata attached to posts.
//!
//! The platform stores scheduling and live-state metadata only; actual
//! media delivery happens on the external `stream_url`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use mindscribe_core::content::validate_title;
use mindscribe_core::error::CoreError;
use mindscribe_core::types::DbId;
use mindscribe_db::models::live_stream::{CreateLiveStream, LiveStream, UpdateLiveStream};
use mindscribe_db::repositories::LiveStreamRepo;
use mindscribe_events::{event_types, DomainEvent};

use super::posts::{ensure_post_owner, fetch_post};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuthor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Fetch a stream or fail with 404.
async fn fetch_stream(state: &AppState, id: DbId) -> AppResult<LiveStream> {
    LiveStreamRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "live stream",
            id,
        }))
}

/// Verify the caller hosts the stream or owns the post.
async fn ensure_stream_host(
    state: &AppState,
    stream: &LiveStream,
    user: &AuthUser,
) -> AppResult<()> {
    if stream.host_id == user.user_id {
        return Ok(());
    }
    let post = fetch_post(state, stream.post_id).await?;
    ensure_post_owner(&post, user)
}

/// POST /api/v1/streams
///
/// Register stream metadata on a post. The host is the caller; a URL is
/// required but not dereferenced.
pub async fn create_stream(
    State(state): State<AppState>,
    RequireAuthor(user): RequireAuthor,
    Json(input): Json<CreateLiveStream>,
) -> AppResult<(StatusCode, Json<DataResponse<LiveStream>>)> {
    validate_title(&input.title)?;
    if input.stream_url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Stream URL must not be empty".into(),
        )));
    }

    let post = fetch_post(&state, input.post_id).await?;
    ensure_post_owner(&post, &user)?;

    let stream = LiveStreamRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: stream })))
}

/// GET /api/v1/streams/{id}
pub async fn get_stream(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LiveStream>>> {
    let stream = fetch_stream(&state, id).await?;
    Ok(Json(DataResponse { data: stream }))
}

/// GET /api/v1/streams/live
///
/// All streams currently live, most recently started first.
pub async fn list_live_streams(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<LiveStream>>>> {
    let streams = LiveStreamRepo::list_live(&state.pool).await?;
    Ok(Json(DataResponse { data: streams }))
}

/// GET /api/v1/posts/{post_id}/streams
pub async fn list_streams_for_post(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<LiveStream>>>> {
    fetch_post(&state, post_id).await?;
    let streams = LiveStreamRepo::list_by_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: streams }))
}

/// PATCH /api/v1/streams/{id}
pub async fn update_stream(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLiveStream>,
) -> AppResult<Json<DataResponse<LiveStream>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }

    let stream = fetch_stream(&state, id).await?;
    ensure_stream_host(&state, &stream, &auth_user).await?;

    let updated = LiveStreamRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "live stream",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/streams/{id}/start
///
/// Transition to live. Starting an already-live stream is a 409.
pub async fn start_stream(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LiveStream>>> {
    let stream = fetch_stream(&state, id).await?;
    ensure_stream_host(&state, &stream, &auth_user).await?;

    let updated = LiveStreamRepo::go_live(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Stream is already live".into())))?;

    state.event_bus.publish(
        DomainEvent::new(event_types::STREAM_STARTED)
            .with_source("live_stream", updated.id)
            .with_actor(auth_user.user_id)
            .with_payload(serde_json::json!({ "post_id": updated.post_id })),
    );

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/streams/{id}/end
///
/// Transition out of live. Ending a stream that is not live is a 409.
pub async fn end_stream(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<LiveStream>>> {
    let stream = fetch_stream(&state, id).await?;
    ensure_stream_host(&state, &stream, &auth_user).await?;

    let updated = LiveStreamRepo::end_stream(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Conflict("Stream is not live".into())))?;

    state.event_bus.publish(
        DomainEvent::new(event_types::STREAM_ENDED)
            .with_source("live_stream", updated.id)
            .with_actor(auth_user.user_id),
    );

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/streams/{id}
pub async fn delete_stream(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let stream = fetch_stream(&state, id).await?;
    ensure_stream_host(&state, &stream, &auth_user).await?;

    LiveStreamRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
