//! Collaborative-post workflow: invite state machine, membership roles,
//! and activity log actions.
//!
//! This module lives in `core` (zero internal deps) so that the API layer,
//! repositories, and the event/email services all reference the same role
//! names, invite statuses, and expiry rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

/// Invites expire this many days after creation. Fixed at creation time.
pub const INVITE_EXPIRY_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Collaboration roles (per post, distinct from account roles)
// ---------------------------------------------------------------------------

pub mod collab_roles {
    /// May edit content, like, and report.
    pub const EDITOR: &str = "editor";
    /// Read-only membership.
    pub const REVIEWER: &str = "reviewer";
    /// May edit content, like, and report.
    pub const CONTRIBUTOR: &str = "contributor";
}

/// The set of all valid collaboration roles.
pub const VALID_COLLAB_ROLES: &[&str] = &[
    collab_roles::EDITOR,
    collab_roles::REVIEWER,
    collab_roles::CONTRIBUTOR,
];

/// Validate a collaboration role name.
pub fn validate_collab_role(role: &str) -> Result<(), CoreError> {
    if !VALID_COLLAB_ROLES.contains(&role) {
        return Err(CoreError::Validation(format!(
            "Invalid collaboration role '{}'. Valid roles: {}",
            role,
            VALID_COLLAB_ROLES.join(", ")
        )));
    }
    Ok(())
}

/// Returns `true` if the given collaboration role grants write access.
///
/// Editors and contributors may mutate content and engagement; reviewers
/// are read-only.
pub fn role_can_edit(role: &str) -> bool {
    role == collab_roles::EDITOR || role == collab_roles::CONTRIBUTOR
}

// ---------------------------------------------------------------------------
// Invite statuses
// ---------------------------------------------------------------------------

/// Lifecycle status of a collaboration invite.
///
/// `pending -> accepted | rejected` on response; `pending -> expired` once
/// the expiry timestamp passes (evaluated lazily on access). The three
/// non-pending statuses are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl InviteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Rejected => "rejected",
            InviteStatus::Expired => "expired",
        }
    }

    /// Parse a status string as stored in the database.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(InviteStatus::Pending),
            "accepted" => Ok(InviteStatus::Accepted),
            "rejected" => Ok(InviteStatus::Rejected),
            "expired" => Ok(InviteStatus::Expired),
            other => Err(CoreError::Internal(format!(
                "Unknown invite status '{other}' in database"
            ))),
        }
    }

    /// `true` once the invite has left the pending state.
    pub fn is_terminal(self) -> bool {
        self != InviteStatus::Pending
    }
}

/// The decision an invitee sends when responding to an invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteDecision {
    Accept,
    Reject,
}

/// Evaluate whether a pending invite may be responded to at `now`.
///
/// Lazy expiry: an invite past its `expires_at` is reported as expired even
/// though no background sweep has touched the row yet. Resolved invites
/// (any terminal status) reject a second response attempt.
pub fn check_respondable(
    status: InviteStatus,
    expires_at: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    match status {
        InviteStatus::Pending if expires_at < now => Err(CoreError::Conflict(
            "Invite has expired and can no longer be answered".into(),
        )),
        InviteStatus::Pending => Ok(()),
        InviteStatus::Expired => Err(CoreError::Conflict(
            "Invite has expired and can no longer be answered".into(),
        )),
        InviteStatus::Accepted | InviteStatus::Rejected => Err(CoreError::Conflict(format!(
            "Invite has already been {}",
            status.as_str()
        ))),
    }
}

// ---------------------------------------------------------------------------
// Activity log actions
// ---------------------------------------------------------------------------

/// Actions recorded in the append-only collaboration activity log.
pub mod activity_actions {
    pub const JOINED_COLLABORATION: &str = "joined_collaboration";
    pub const LEFT_COLLABORATION: &str = "left_collaboration";
    pub const EDITED_CONTENT: &str = "edited_content";
    pub const LIKED: &str = "liked";
    pub const REPORTED: &str = "reported";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
