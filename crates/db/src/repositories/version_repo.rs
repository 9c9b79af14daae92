//! Repository for the `post_versions` table.
//!
//! Versions are immutable snapshots. A collaborative edit appends the
//! next version, updates the live post content, and logs the edit, all
//! inside one transaction so the version index never skips or repeats
//! under concurrent editors.

use sqlx::PgPool;

use mindscribe_core::collaboration::activity_actions;
use mindscribe_core::types::DbId;

use crate::models::collaboration::PostVersion;

/// Column list for post_versions queries.
const COLUMNS: &str = "id, post_id, version, title, content, edited_by, role, created_at";

/// Provides append and read operations for post version snapshots.
pub struct VersionRepo;

impl VersionRepo {
    /// Append a new version for an edit and sync the live post row.
    ///
    /// The version index is `MAX(version) + 1` computed inside the
    /// transaction; the unique (post, version) constraint turns a lost
    /// race into a retryable conflict instead of a duplicate index.
    pub async fn record_edit(
        pool: &PgPool,
        post_id: DbId,
        edited_by: DbId,
        role: &str,
        title: &str,
        content: &str,
    ) -> Result<PostVersion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO post_versions (post_id, version, title, content, edited_by, role)
             SELECT $1, COALESCE(MAX(version), 0) + 1, $2, $3, $4, $5
             FROM post_versions WHERE post_id = $1
             RETURNING {COLUMNS}"
        );
        let version = sqlx::query_as::<_, PostVersion>(&query)
            .bind(post_id)
            .bind(title)
            .bind(content)
            .bind(edited_by)
            .bind(role)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE posts SET title = $2, content = $3 WHERE id = $1")
            .bind(post_id)
            .bind(title)
            .bind(content)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO collaboration_activity (post_id, user_id, action, detail)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(post_id)
        .bind(edited_by)
        .bind(activity_actions::EDITED_CONTENT)
        .bind(serde_json::json!({ "version": version.version, "role": role }))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(version)
    }

    /// List all versions for a post, in version order.
    pub async fn list_by_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<PostVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM post_versions
             WHERE post_id = $1
             ORDER BY version ASC"
        );
        sqlx::query_as::<_, PostVersion>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Find a specific version of a post.
    pub async fn find_by_post_and_version(
        pool: &PgPool,
        post_id: DbId,
        version: i32,
    ) -> Result<Option<PostVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM post_versions
             WHERE post_id = $1 AND version = $2"
        );
        sqlx::query_as::<_, PostVersion>(&query)
            .bind(post_id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }
}
