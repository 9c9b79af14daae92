//! Repository for the `live_streams` table.

use sqlx::PgPool;

use mindscribe_core::types::DbId;

use crate::models::live_stream::{CreateLiveStream, LiveStream, UpdateLiveStream};

/// Column list for live_streams queries.
const COLUMNS: &str = "id, post_id, host_id, title, stream_url, scheduled_start, \
                       is_live, started_at, ended_at, created_at, updated_at";

/// Provides CRUD and lifecycle operations for live-stream metadata.
pub struct LiveStreamRepo;

impl LiveStreamRepo {
    /// Register stream metadata on a post.
    pub async fn create(
        pool: &PgPool,
        host_id: DbId,
        input: &CreateLiveStream,
    ) -> Result<LiveStream, sqlx::Error> {
        let query = format!(
            "INSERT INTO live_streams (post_id, host_id, title, stream_url, scheduled_start)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LiveStream>(&query)
            .bind(input.post_id)
            .bind(host_id)
            .bind(&input.title)
            .bind(&input.stream_url)
            .bind(input.scheduled_start)
            .fetch_one(pool)
            .await
    }

    /// Find a stream by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LiveStream>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM live_streams WHERE id = $1");
        sqlx::query_as::<_, LiveStream>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List streams attached to a post, newest first.
    pub async fn list_by_post(pool: &PgPool, post_id: DbId) -> Result<Vec<LiveStream>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM live_streams WHERE post_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, LiveStream>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// List streams currently marked live, most recently started first.
    pub async fn list_live(pool: &PgPool) -> Result<Vec<LiveStream>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM live_streams WHERE is_live = true ORDER BY started_at DESC"
        );
        sqlx::query_as::<_, LiveStream>(&query).fetch_all(pool).await
    }

    /// Update stream metadata. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLiveStream,
    ) -> Result<Option<LiveStream>, sqlx::Error> {
        let query = format!(
            "UPDATE live_streams SET
                title = COALESCE($2, title),
                stream_url = COALESCE($3, stream_url),
                scheduled_start = COALESCE($4, scheduled_start)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LiveStream>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.stream_url)
            .bind(input.scheduled_start)
            .fetch_optional(pool)
            .await
    }

    /// Mark a stream as live. Only transitions a stream that is not
    /// already live; returns `None` otherwise.
    pub async fn go_live(pool: &PgPool, id: DbId) -> Result<Option<LiveStream>, sqlx::Error> {
        let query = format!(
            "UPDATE live_streams SET is_live = true, started_at = NOW(), ended_at = NULL
             WHERE id = $1 AND is_live = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LiveStream>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a live stream as ended. Returns `None` if the stream was not live.
    pub async fn end_stream(pool: &PgPool, id: DbId) -> Result<Option<LiveStream>, sqlx::Error> {
        let query = format!(
            "UPDATE live_streams SET is_live = false, ended_at = NOW()
             WHERE id = $1 AND is_live = true
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LiveStream>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a stream record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM live_streams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
