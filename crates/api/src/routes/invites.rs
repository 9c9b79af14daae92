//! Route definitions for collaboration invites.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::collaboration;
use crate::state::AppState;

/// Invite routes mounted at `/invites`.
///
/// ```text
/// GET  /               -> list_my_invites
/// POST /               -> create_invite (post owner)
/// POST /{id}/respond   -> respond_invite (invitee only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(collaboration::list_my_invites).post(collaboration::create_invite),
        )
        .route("/{id}/respond", post(collaboration::respond_invite))
}
