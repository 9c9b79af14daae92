//! Repository for the `polls` and `poll_choices` tables.

use chrono::NaiveDate;
use sqlx::PgPool;

use mindscribe_core::types::DbId;

use crate::models::poll::{Poll, PollChoice};

/// Column list for polls queries.
const POLL_COLUMNS: &str = "id, post_id, created_by, question, ends_on, created_at";

/// Column list for poll_choices queries.
const CHOICE_COLUMNS: &str = "id, poll_id, choice_text, votes";

/// Provides CRUD and voting operations for polls.
pub struct PollRepo;

impl PollRepo {
    /// Create a poll with its choices in a single transaction.
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        created_by: DbId,
        question: &str,
        choices: &[String],
        ends_on: NaiveDate,
    ) -> Result<(Poll, Vec<PollChoice>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO polls (post_id, created_by, question, ends_on)
             VALUES ($1, $2, $3, $4)
             RETURNING {POLL_COLUMNS}"
        );
        let poll = sqlx::query_as::<_, Poll>(&query)
            .bind(post_id)
            .bind(created_by)
            .bind(question)
            .bind(ends_on)
            .fetch_one(&mut *tx)
            .await?;

        let choice_query = format!(
            "INSERT INTO poll_choices (poll_id, choice_text)
             VALUES ($1, $2)
             RETURNING {CHOICE_COLUMNS}"
        );
        let mut rows = Vec::with_capacity(choices.len());
        for text in choices {
            let row = sqlx::query_as::<_, PollChoice>(&choice_query)
                .bind(poll.id)
                .bind(text)
                .fetch_one(&mut *tx)
                .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok((poll, rows))
    }

    /// Find a poll by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Poll>, sqlx::Error> {
        let query = format!("SELECT {POLL_COLUMNS} FROM polls WHERE id = $1");
        sqlx::query_as::<_, Poll>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List polls attached to a post, newest first.
    pub async fn list_by_post(pool: &PgPool, post_id: DbId) -> Result<Vec<Poll>, sqlx::Error> {
        let query = format!(
            "SELECT {POLL_COLUMNS} FROM polls WHERE post_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Poll>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// List the choices of a poll with current vote counts.
    pub async fn list_choices(pool: &PgPool, poll_id: DbId) -> Result<Vec<PollChoice>, sqlx::Error> {
        let query = format!(
            "SELECT {CHOICE_COLUMNS} FROM poll_choices WHERE poll_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, PollChoice>(&query)
            .bind(poll_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically record a vote on a choice. The poll id is matched too so
    /// a choice id from another poll cannot be counted.
    ///
    /// Returns the updated choice, or `None` if the (poll, choice) pair
    /// does not exist.
    pub async fn vote(
        pool: &PgPool,
        poll_id: DbId,
        choice_id: DbId,
    ) -> Result<Option<PollChoice>, sqlx::Error> {
        let query = format!(
            "UPDATE poll_choices SET votes = votes + 1
             WHERE id = $1 AND poll_id = $2
             RETURNING {CHOICE_COLUMNS}"
        );
        sqlx::query_as::<_, PollChoice>(&query)
            .bind(choice_id)
            .bind(poll_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a poll and its choices. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM polls WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
