//! Repository for the `collaboration_invites` table.
//!
//! Accepting an invite is a single transaction that records the invite
//! response, materializes the membership, marks the post collaborative,
//! and appends a `joined_collaboration` activity entry. Either all four
//! writes land or none do.

use sqlx::PgPool;

use mindscribe_core::collaboration::{activity_actions, INVITE_EXPIRY_DAYS};
use mindscribe_core::types::DbId;

use crate::models::collaboration::{Collaboration, CollaborationInvite};

/// Column list for collaboration_invites queries.
const COLUMNS: &str = "id, post_id, inviter_id, invitee_id, role, status, \
                       expires_at, responded_at, created_at";

/// Column list for collaborations queries.
const MEMBER_COLUMNS: &str = "id, post_id, user_id, role, created_at";

/// Provides lifecycle operations for collaboration invites.
pub struct InviteRepo;

impl InviteRepo {
    /// Create a pending invite expiring a fixed window from now.
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        inviter_id: DbId,
        invitee_id: DbId,
        role: &str,
    ) -> Result<CollaborationInvite, sqlx::Error> {
        let query = format!(
            "INSERT INTO collaboration_invites (post_id, inviter_id, invitee_id, role, expires_at)
             VALUES ($1, $2, $3, $4, NOW() + INTERVAL '{INVITE_EXPIRY_DAYS} days')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollaborationInvite>(&query)
            .bind(post_id)
            .bind(inviter_id)
            .bind(invitee_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Find an invite by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CollaborationInvite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM collaboration_invites WHERE id = $1");
        sqlx::query_as::<_, CollaborationInvite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an invite for a (post, invitee) pair regardless of status.
    /// The unique constraint guarantees at most one row.
    pub async fn find_for_pair(
        pool: &PgPool,
        post_id: DbId,
        invitee_id: DbId,
    ) -> Result<Option<CollaborationInvite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaboration_invites
             WHERE post_id = $1 AND invitee_id = $2"
        );
        sqlx::query_as::<_, CollaborationInvite>(&query)
            .bind(post_id)
            .bind(invitee_id)
            .fetch_optional(pool)
            .await
    }

    /// List invites addressed to a user, newest first.
    pub async fn list_for_invitee(
        pool: &PgPool,
        invitee_id: DbId,
    ) -> Result<Vec<CollaborationInvite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaboration_invites
             WHERE invitee_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CollaborationInvite>(&query)
            .bind(invitee_id)
            .fetch_all(pool)
            .await
    }

    /// List invites sent for a post, newest first.
    pub async fn list_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<CollaborationInvite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaboration_invites
             WHERE post_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, CollaborationInvite>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Persist a lapsed invite as expired. Only a pending invite can lapse.
    pub async fn mark_expired(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CollaborationInvite>, sqlx::Error> {
        let query = format!(
            "UPDATE collaboration_invites
             SET status = 'expired', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollaborationInvite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record a rejection. Only a pending invite can be rejected.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CollaborationInvite>, sqlx::Error> {
        let query = format!(
            "UPDATE collaboration_invites
             SET status = 'rejected', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollaborationInvite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an invite row, releasing the (post, invitee) pair for a
    /// fresh invite. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collaboration_invites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Accept an invite in one transaction: mark it accepted, insert the
    /// collaboration row, flag the post as collaborative, and append the
    /// join activity.
    ///
    /// Returns the accepted invite and the new membership, or `None` if
    /// the invite was no longer pending (lost race with another response).
    pub async fn accept(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(CollaborationInvite, Collaboration)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE collaboration_invites
             SET status = 'accepted', responded_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        let invite = sqlx::query_as::<_, CollaborationInvite>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(invite) = invite else {
            tx.rollback().await?;
            return Ok(None);
        };

        // Idempotent: a membership already materialized by a concurrent
        // accept is returned unchanged instead of surfacing a conflict.
        let member_query = format!(
            "INSERT INTO collaborations (post_id, user_id, role)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_collaborations_member
             DO UPDATE SET role = collaborations.role
             RETURNING {MEMBER_COLUMNS}"
        );
        let membership = sqlx::query_as::<_, Collaboration>(&member_query)
            .bind(invite.post_id)
            .bind(invite.invitee_id)
            .bind(&invite.role)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE posts SET is_collaborative = true WHERE id = $1")
            .bind(invite.post_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO collaboration_activity (post_id, user_id, action, detail)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(invite.post_id)
        .bind(invite.invitee_id)
        .bind(activity_actions::JOINED_COLLABORATION)
        .bind(serde_json::json!({ "role": invite.role, "invite_id": invite.id }))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some((invite, membership)))
    }
}
