//! Handlers for the collaborative-editing workflow: invites, membership,
//! versioned edits, and the activity log.
//!
//! Invite expiry is lazy: any read or response attempt that finds a
//! pending invite past `expires_at` first persists the `expired` status,
//! then reports the conflict.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use mindscribe_core::collaboration::{
    check_respondable, role_can_edit, validate_collab_role, InviteDecision, InviteStatus,
};
use mindscribe_core::content::{validate_content, validate_title};
use mindscribe_core::error::CoreError;
use mindscribe_core::roles::ROLE_ADMIN;
use mindscribe_core::types::DbId;
use mindscribe_db::models::collaboration::{
    ActivityEntry, Collaboration, CollaborationInvite, CreateInvite, InviteResponse, PostVersion,
    RecordEdit,
};
use mindscribe_db::repositories::{
    ActivityRepo, CollaborationRepo, InviteRepo, UserRepo, VersionRepo,
};
use mindscribe_events::{event_types, DomainEvent};

use super::posts::{ensure_post_owner, fetch_post};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default and maximum page size for activity listings.
const ACTIVITY_DEFAULT_LIMIT: i64 = 50;
const ACTIVITY_MAX_LIMIT: i64 = 200;

/// Query parameters for activity listings.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(ACTIVITY_DEFAULT_LIMIT)
        .clamp(1, ACTIVITY_MAX_LIMIT)
}

/// If a pending invite has lapsed, persist the expired status and return
/// the updated row. Lost races against a concurrent response leave the
/// winner's status in place.
async fn settle_expiry(
    state: &AppState,
    invite: CollaborationInvite,
) -> AppResult<CollaborationInvite> {
    let status = InviteStatus::parse(&invite.status)?;
    if status == InviteStatus::Pending && invite.expires_at < Utc::now() {
        if let Some(expired) = InviteRepo::mark_expired(&state.pool, invite.id).await? {
            return Ok(expired);
        }
        // Someone responded between our read and the update; re-read.
        if let Some(current) = InviteRepo::find_by_id(&state.pool, invite.id).await? {
            return Ok(current);
        }
    }
    Ok(invite)
}

// ---------------------------------------------------------------------------
// Invites
// ---------------------------------------------------------------------------

/// POST /api/v1/invites
///
/// Invite a user (addressed by email) to collaborate on a post. Only the
/// post author or an admin may invite. The invitee must be an existing,
/// active account. An unresolved prior invite or an existing membership
/// is a conflict; a resolved invite is superseded by a fresh one only
/// after the pair row is released, so the unique constraint also guards
/// racing duplicate requests.
pub async fn create_invite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateInvite>,
) -> AppResult<(StatusCode, Json<DataResponse<CollaborationInvite>>)> {
    validate_collab_role(&input.role)?;

    let post = fetch_post(&state, input.post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let invitee = UserRepo::find_by_email(&state.pool, &input.invitee_email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "No account found for '{}'",
                input.invitee_email
            )))
        })?;
    if !invitee.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Invitee account is deactivated".into(),
        )));
    }
    if invitee.id == post.author_id {
        return Err(AppError::Core(CoreError::Validation(
            "The post author cannot be invited to their own post".into(),
        )));
    }

    if CollaborationRepo::role_of(&state.pool, post.id, invitee.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User is already a collaborator on this post".into(),
        )));
    }

    if let Some(existing) = InviteRepo::find_for_pair(&state.pool, post.id, invitee.id).await? {
        let existing = settle_expiry(&state, existing).await?;
        match InviteStatus::parse(&existing.status)? {
            InviteStatus::Pending => {
                return Err(AppError::Core(CoreError::Conflict(
                    "An invite for this user is already pending".into(),
                )));
            }
            InviteStatus::Accepted => {
                return Err(AppError::Core(CoreError::Conflict(
                    "User has already accepted an invite to this post".into(),
                )));
            }
            // A rejected or expired invite may be replaced.
            InviteStatus::Rejected | InviteStatus::Expired => {
                InviteRepo::delete(&state.pool, existing.id).await?;
            }
        }
    }

    let invite =
        InviteRepo::create(&state.pool, post.id, auth_user.user_id, invitee.id, &input.role)
            .await?;

    state.event_bus.publish(
        DomainEvent::new(event_types::INVITE_SENT)
            .with_source("collaboration_invite", invite.id)
            .with_actor(auth_user.user_id)
            .with_payload(serde_json::json!({
                "post_id": post.id,
                "invitee_id": invitee.id,
                "role": invite.role,
            })),
    );

    if let Some(email) = &state.email {
        let inviter_name = UserRepo::find_by_id(&state.pool, auth_user.user_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_else(|| "Someone".to_string());
        if let Err(e) = email
            .deliver_invite(&invitee.email, &post.title, &inviter_name, &invite.role)
            .await
        {
            // Notification failure must not fail the invite itself.
            tracing::warn!(error = %e, invite_id = invite.id, "Invite email failed");
        }
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: invite })))
}

/// GET /api/v1/invites
///
/// Invites addressed to the caller, with lazy expiry applied.
pub async fn list_my_invites(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<CollaborationInvite>>>> {
    let invites = InviteRepo::list_for_invitee(&state.pool, auth_user.user_id).await?;
    let mut settled = Vec::with_capacity(invites.len());
    for invite in invites {
        settled.push(settle_expiry(&state, invite).await?);
    }
    Ok(Json(DataResponse { data: settled }))
}

/// GET /api/v1/posts/{post_id}/invites
///
/// Invites sent for a post. Author or admin only.
pub async fn list_post_invites(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CollaborationInvite>>>> {
    let post = fetch_post(&state, post_id).await?;
    ensure_post_owner(&post, &auth_user)?;

    let invites = InviteRepo::list_for_post(&state.pool, post_id).await?;
    let mut settled = Vec::with_capacity(invites.len());
    for invite in invites {
        settled.push(settle_expiry(&state, invite).await?);
    }
    Ok(Json(DataResponse { data: settled }))
}

/// POST /api/v1/invites/{id}/respond
///
/// Accept or reject an invite. Only the invitee may respond; an expired
/// or already-resolved invite is a conflict. Accepting materializes the
/// membership, flags the post collaborative, and logs the join, all in
/// one transaction.
pub async fn respond_invite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<InviteResponse>,
) -> AppResult<Json<DataResponse<CollaborationInvite>>> {
    let invite = InviteRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "invite",
            id,
        }))?;

    if invite.invitee_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the invitee may respond to this invite".into(),
        )));
    }

    let invite = settle_expiry(&state, invite).await?;
    let status = InviteStatus::parse(&invite.status)?;
    check_respondable(status, invite.expires_at, Utc::now())?;

    let resolved = match input.decision {
        InviteDecision::Accept => {
            let (invite, membership) = InviteRepo::accept(&state.pool, id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Conflict(
                        "Invite was resolved by a concurrent request".into(),
                    ))
                })?;

            state.event_bus.publish(
                DomainEvent::new(event_types::INVITE_ACCEPTED)
                    .with_source("collaboration_invite", invite.id)
                    .with_actor(auth_user.user_id)
                    .with_payload(serde_json::json!({
                        "post_id": invite.post_id,
                        "role": membership.role,
                    })),
            );
            invite
        }
        InviteDecision::Reject => {
            let invite = InviteRepo::reject(&state.pool, id).await?.ok_or_else(|| {
                AppError::Core(CoreError::Conflict(
                    "Invite was resolved by a concurrent request".into(),
                ))
            })?;

            state.event_bus.publish(
                DomainEvent::new(event_types::INVITE_REJECTED)
                    .with_source("collaboration_invite", invite.id)
                    .with_actor(auth_user.user_id)
                    .with_payload(serde_json::json!({ "post_id": invite.post_id })),
            );
            invite
        }
    };

    Ok(Json(DataResponse { data: resolved }))
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// GET /api/v1/posts/{post_id}/collaborators
pub async fn list_collaborators(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Collaboration>>>> {
    fetch_post(&state, post_id).await?;
    let members = CollaborationRepo::list_for_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: members }))
}

/// DELETE /api/v1/posts/{post_id}/collaborators/{user_id}
///
/// Remove a collaborator. The member themselves may leave; the post
/// author or an admin may remove anyone. Logs `left_collaboration`.
pub async fn remove_collaborator(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((post_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let post = fetch_post(&state, post_id).await?;

    let self_removal = user_id == auth_user.user_id;
    if !self_removal {
        ensure_post_owner(&post, &auth_user)?;
    }

    let removed = CollaborationRepo::remove(&state.pool, post_id, user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "collaborator",
            id: user_id,
        }));
    }

    state.event_bus.publish(
        DomainEvent::new(event_types::COLLABORATOR_LEFT)
            .with_source("post", post_id)
            .with_actor(auth_user.user_id)
            .with_payload(serde_json::json!({ "user_id": user_id })),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Versioned edits
// ---------------------------------------------------------------------------

/// POST /api/v1/posts/{post_id}/edits
///
/// Record a collaborative edit. Allowed for the post author, admins, and
/// collaborators whose role grants write access; reviewers are rejected.
/// Appends the next version snapshot, syncs the live post, and logs the
/// edit in one transaction.
pub async fn record_edit(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(post_id): Path<DbId>,
    Json(input): Json<RecordEdit>,
) -> AppResult<(StatusCode, Json<DataResponse<PostVersion>>)> {
    validate_content(&input.content)?;
    if let Some(title) = &input.title {
        validate_title(title)?;
    }

    let post = fetch_post(&state, post_id).await?;

    let editor_role = if post.author_id == auth_user.user_id {
        "author".to_string()
    } else if auth_user.role == ROLE_ADMIN {
        "admin".to_string()
    } else {
        let role = CollaborationRepo::role_of(&state.pool, post_id, auth_user.user_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "You are not a collaborator on this post".into(),
                ))
            })?;
        if !role_can_edit(&role) {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "The '{role}' role does not grant edit access"
            ))));
        }
        role
    };

    let title = input.title.as_deref().unwrap_or(&post.title);

    let version = VersionRepo::record_edit(
        &state.pool,
        post_id,
        auth_user.user_id,
        &editor_role,
        title,
        &input.content,
    )
    .await?;

    state.event_bus.publish(
        DomainEvent::new(event_types::POST_EDITED)
            .with_source("post", post_id)
            .with_actor(auth_user.user_id)
            .with_payload(serde_json::json!({ "version": version.version })),
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: version })))
}

/// GET /api/v1/posts/{post_id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PostVersion>>>> {
    fetch_post(&state, post_id).await?;
    let versions = VersionRepo::list_by_post(&state.pool, post_id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /api/v1/posts/{post_id}/versions/{version}
pub async fn get_version(
    State(state): State<AppState>,
    Path((post_id, version)): Path<(DbId, i32)>,
) -> AppResult<Json<DataResponse<PostVersion>>> {
    fetch_post(&state, post_id).await?;

    let snapshot = VersionRepo::find_by_post_and_version(&state.pool, post_id, version)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Post {post_id} has no version {version}"))
        })?;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

/// GET /api/v1/posts/{post_id}/activity
pub async fn list_post_activity(
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Query(params): Query<ActivityQuery>,
) -> AppResult<Json<DataResponse<Vec<ActivityEntry>>>> {
    fetch_post(&state, post_id).await?;
    let entries =
        ActivityRepo::list_by_post(&state.pool, post_id, clamp_limit(params.limit)).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/users/me/activity
pub async fn list_my_activity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ActivityQuery>,
) -> AppResult<Json<DataResponse<Vec<ActivityEntry>>>> {
    let entries =
        ActivityRepo::list_by_user(&state.pool, auth_user.user_id, clamp_limit(params.limit))
            .await?;
    Ok(Json(DataResponse { data: entries }))
}
