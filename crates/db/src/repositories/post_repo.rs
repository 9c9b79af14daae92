//! Repository for the `posts` table.

use sqlx::PgPool;

use mindscribe_core::collaboration::activity_actions;
use mindscribe_core::types::DbId;

use crate::models::post::{Post, UpdatePost, UpdatePostAnnotations};

/// Column list for posts queries.
const COLUMNS: &str = "id, author_id, title, slug, content, language, status, \
                       likes, dislikes, views, comment_count, is_collaborative, \
                       moderation_flagged, moderation_reason, \
                       ai_summary, ai_keywords, ai_sentiment, \
                       created_at, updated_at";

/// Provides CRUD and counter operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Create a new post. The slug is resolved by the caller before insert.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        title: &str,
        slug: &str,
        content: &str,
        language: &str,
        status: &str,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (author_id, title, slug, content, language, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(author_id)
            .bind(title)
            .bind(slug)
            .bind(content)
            .bind(language)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Find a post by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post by its unique slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE slug = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List posts, optionally filtered by status and/or author, newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        author_id: Option<DbId>,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts
             WHERE ($1::varchar IS NULL OR status = $1)
               AND ($2::bigint IS NULL OR author_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(status)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// List published posts carrying a given tag, newest first.
    pub async fn list_published_by_tag(
        pool: &PgPool,
        tag_id: DbId,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT p.{} FROM posts p
             JOIN post_tags pt ON pt.post_id = p.id
             WHERE pt.tag_id = $1 AND p.status = 'published'
             ORDER BY p.created_at DESC",
            COLUMNS.replace(", ", ", p.")
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(tag_id)
            .fetch_all(pool)
            .await
    }

    /// Update a post's editable fields. Returns the updated row, or `None`
    /// if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                language = COALESCE($4, language),
                status = COALESCE($5, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.language)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Patch AI-derived annotations onto a post.
    pub async fn update_annotations(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePostAnnotations,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET
                ai_summary = COALESCE($2, ai_summary),
                ai_keywords = COALESCE($3, ai_keywords),
                ai_sentiment = COALESCE($4, ai_sentiment)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(&input.ai_summary)
            .bind(&input.ai_keywords)
            .bind(&input.ai_sentiment)
            .fetch_optional(pool)
            .await
    }

    /// Set the post status. Returns the updated row, or `None` if not found.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("UPDATE posts SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Atomically increment one of the engagement counters. The column name
    /// comes from a fixed internal set, never from user input.
    async fn bump_counter(pool: &PgPool, id: DbId, column: &str) -> Result<Option<Post>, sqlx::Error> {
        let query =
            format!("UPDATE posts SET {column} = {column} + 1 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record a like.
    pub async fn increment_likes(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        Self::bump_counter(pool, id, "likes").await
    }

    /// Record a dislike.
    pub async fn increment_dislikes(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        Self::bump_counter(pool, id, "dislikes").await
    }

    /// Record a view.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        Self::bump_counter(pool, id, "views").await
    }

    /// Flag or clear moderation state on a post.
    pub async fn set_moderation(
        pool: &PgPool,
        id: DbId,
        flagged: bool,
        reason: Option<&str>,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET moderation_flagged = $2, moderation_reason = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(flagged)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Flag a post as reported by a user and append the `reported`
    /// activity entry in one transaction. Returns `None` if the post
    /// does not exist.
    pub async fn report(
        pool: &PgPool,
        id: DbId,
        reporter_id: DbId,
        reason: &str,
    ) -> Result<Option<Post>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE posts SET moderation_flagged = true, moderation_reason = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(reason)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(post) = post else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO collaboration_activity (post_id, user_id, action, detail)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(reporter_id)
        .bind(activity_actions::REPORTED)
        .bind(serde_json::json!({ "reason": reason }))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(post))
    }

    /// Delete a post. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Check whether a slug is already taken.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM posts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }
}
