//! Repository for the `collaborations` membership table.

use sqlx::PgPool;

use mindscribe_core::collaboration::activity_actions;
use mindscribe_core::types::DbId;

use crate::models::collaboration::Collaboration;

/// Column list for collaborations queries.
const COLUMNS: &str = "id, post_id, user_id, role, created_at";

/// Provides membership lookups and removal for collaborative posts.
pub struct CollaborationRepo;

impl CollaborationRepo {
    /// Look up a user's collaborator role on a post, if any.
    pub async fn role_of(
        pool: &PgPool,
        post_id: DbId,
        user_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT role FROM collaborations WHERE post_id = $1 AND user_id = $2",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(role,)| role))
    }

    /// List collaborators on a post, earliest joiner first.
    pub async fn list_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<Collaboration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collaborations WHERE post_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Collaboration>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a collaborator and append the leave activity in one
    /// transaction. Returns `true` if a membership was removed.
    pub async fn remove(
        pool: &PgPool,
        post_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let row: Option<(String,)> = sqlx::query_as(
            "DELETE FROM collaborations WHERE post_id = $1 AND user_id = $2 RETURNING role",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((role,)) = row else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query(
            "INSERT INTO collaboration_activity (post_id, user_id, action, detail)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(post_id)
        .bind(user_id)
        .bind(activity_actions::LEFT_COLLABORATION)
        .bind(serde_json::json!({ "role": role }))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
