//! Repository for the append-only `collaboration_activity` table.

use sqlx::PgPool;

use mindscribe_core::types::DbId;

use crate::models::collaboration::ActivityEntry;

/// Column list for collaboration_activity queries.
const COLUMNS: &str = "id, post_id, user_id, action, detail, created_at";

/// Provides append and read operations for the collaboration audit trail.
/// There is deliberately no update or delete.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append an activity entry.
    pub async fn append(
        pool: &PgPool,
        post_id: DbId,
        user_id: DbId,
        action: &str,
        detail: serde_json::Value,
    ) -> Result<ActivityEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO collaboration_activity (post_id, user_id, action, detail)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(post_id)
            .bind(user_id)
            .bind(action)
            .bind(detail)
            .fetch_one(pool)
            .await
    }

    /// List activity for a post, newest first.
    pub async fn list_by_post(
        pool: &PgPool,
        post_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaboration_activity
             WHERE post_id = $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(post_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List activity by a user across all posts, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaboration_activity
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ActivityEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
