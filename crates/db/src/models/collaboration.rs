//! Collaborative workflow models: invites, memberships, version snapshots,
//! and activity log entries.

use mindscribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// CollaborationInvite
// ---------------------------------------------------------------------------

/// A row from the `collaboration_invites` table.
///
/// Exactly one invite per (post, invitee) pair; `expires_at` is fixed at
/// creation time (7 days out) and checked lazily on every read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CollaborationInvite {
    pub id: DbId,
    pub post_id: DbId,
    pub inviter_id: DbId,
    pub invitee_id: DbId,
    pub role: String,
    pub status: String,
    pub expires_at: Timestamp,
    pub responded_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating an invite. The invitee is addressed by email.
#[derive(Debug, Deserialize)]
pub struct CreateInvite {
    pub post_id: DbId,
    pub invitee_email: String,
    pub role: String,
}

/// DTO for responding to an invite.
#[derive(Debug, Deserialize)]
pub struct InviteResponse {
    pub decision: mindscribe_core::collaboration::InviteDecision,
}

// ---------------------------------------------------------------------------
// Collaboration (materialized membership)
// ---------------------------------------------------------------------------

/// A row from the `collaborations` table. Unique per (post, user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Collaboration {
    pub id: DbId,
    pub post_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// PostVersion
// ---------------------------------------------------------------------------

/// An immutable content snapshot from the `post_versions` table.
///
/// `version` is a monotonically increasing index starting at 1; the row is
/// never mutated after insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostVersion {
    pub id: DbId,
    pub post_id: DbId,
    pub version: i32,
    pub title: String,
    pub content: String,
    pub edited_by: DbId,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for a collaborative edit that produces a new version.
#[derive(Debug, Deserialize)]
pub struct RecordEdit {
    pub title: Option<String>,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Activity log
// ---------------------------------------------------------------------------

/// An append-only audit entry from the `collaboration_activity` table.
/// No `updated_at`: rows are immutable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEntry {
    pub id: DbId,
    pub post_id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub detail: serde_json::Value,
    pub created_at: Timestamp,
}
