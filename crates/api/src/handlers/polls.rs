//! Handlers for polls: creation, voting, and results.
//!
//! Poll closing is checked lazily against the end date at vote time;
//! there is no background job flipping a flag.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use mindscribe_core::error::CoreError;
use mindscribe_core::poll::{has_ended, validate_choices, validate_end_date, validate_question};
use mindscribe_core::types::DbId;
use mindscribe_db::models::poll::{CreatePoll, PollChoice, PollResults, VoteRequest};
use mindscribe_db::repositories::PollRepo;
use mindscribe_events::{event_types, DomainEvent};

use super::posts::{ensure_post_owner, fetch_post};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/polls
///
/// Create a poll on a post. Only the post's author (or an admin) may
/// attach polls; the end date must be in the future.
pub async fn create_poll(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreatePoll>,
) -> AppResult<(StatusCode, Json<DataResponse<PollResults>>)> {
    validate_question(&input.question)?;
    validate_choices(&input.choices)?;
    validate_end_date(input.ends_on, Utc::now().date_naive())?;

    let post = fetch_post(&state, input.post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let (poll, choices) = PollRepo::create(
        &state.pool,
        input.post_id,
        auth_user.user_id,
        &input.question,
        &input.choices,
        input.ends_on,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PollResults { poll, choices },
        }),
    ))
}

/// GET /api/v1/polls/{id}
///
/// The poll with its choices and current vote counts.
pub async fn get_poll(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PollResults>>> {
    let poll = PollRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "poll", id }))?;
    let choices = PollRepo::list_choices(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: PollResults { poll, choices },
    }))
}

/// GET /api/v1/posts/{post_id}/polls
pub async fn list_polls_for_post(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PollResults>>>> {
    fetch_post(&state, post_id).await?;

    let polls = PollRepo::list_by_post(&state.pool, post_id).await?;
    let mut results = Vec::with_capacity(polls.len());
    for poll in polls {
        let choices = PollRepo::list_choices(&state.pool, poll.id).await?;
        results.push(PollResults { poll, choices });
    }
    Ok(Json(DataResponse { data: results }))
}

/// POST /api/v1/polls/{id}/vote
///
/// Cast a vote. Requires authentication but votes are not deduplicated
/// per user. Closed polls reject votes with 409.
pub async fn vote(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<Json<DataResponse<PollChoice>>> {
    let poll = PollRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "poll", id }))?;

    if has_ended(poll.ends_on, Utc::now().date_naive()) {
        return Err(AppError::Core(CoreError::Conflict(
            "Poll has ended and no longer accepts votes".into(),
        )));
    }

    let choice = PollRepo::vote(&state.pool, id, input.choice_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "poll choice",
            id: input.choice_id,
        }))?;

    state.event_bus.publish(
        DomainEvent::new(event_types::POLL_VOTED)
            .with_source("poll", id)
            .with_actor(user.user_id)
            .with_payload(serde_json::json!({ "choice_id": choice.id })),
    );

    Ok(Json(DataResponse { data: choice }))
}

/// DELETE /api/v1/polls/{id}
pub async fn delete_poll(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let poll = PollRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "poll", id }))?;

    let post = fetch_post(&state, poll.post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    PollRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
