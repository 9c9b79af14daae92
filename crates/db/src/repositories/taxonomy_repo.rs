//! Repositories for the `tags`, `categories`, and their post
//! association tables.

use sqlx::PgPool;

use mindscribe_core::types::DbId;

use crate::models::taxonomy::{Category, Tag};

// ---------------------------------------------------------------------------
// TagRepo
// ---------------------------------------------------------------------------

/// Column list for tags queries.
const TAG_COLUMNS: &str = "id, name, created_at";

/// Provides CRUD operations for tags and post-tag associations.
pub struct TagRepo;

impl TagRepo {
    /// Fetch a tag by name, creating it if absent. Names are stored
    /// lowercase so "Rust" and "rust" resolve to one tag.
    pub async fn get_or_create(pool: &PgPool, name: &str) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name) VALUES (LOWER($1))
             ON CONFLICT (name) DO UPDATE SET name = tags.name
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a tag by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tags alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY name ASC");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// List tags attached to a post.
    pub async fn list_for_post(pool: &PgPool, post_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT t.id, t.name, t.created_at FROM tags t
             JOIN post_tags pt ON pt.tag_id = t.id
             WHERE pt.post_id = $1
             ORDER BY t.name ASC"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Attach a tag to a post. Idempotent: re-attaching is a no-op.
    pub async fn attach(pool: &PgPool, post_id: DbId, tag_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_post_tags_pair DO NOTHING",
        )
        .bind(post_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Detach a tag from a post. Returns `true` if an association existed.
    pub async fn detach(pool: &PgPool, post_id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM post_tags WHERE post_id = $1 AND tag_id = $2")
            .bind(post_id)
            .bind(tag_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// CategoryRepo
// ---------------------------------------------------------------------------

/// Column list for categories queries.
const CATEGORY_COLUMNS: &str = "id, name, created_at";

/// Provides CRUD operations for categories and post-category associations.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Fetch a category by name, creating it if absent.
    pub async fn get_or_create(pool: &PgPool, name: &str) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = categories.name
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a category by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// List categories attached to a post.
    pub async fn list_for_post(pool: &PgPool, post_id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT c.id, c.name, c.created_at FROM categories c
             JOIN post_categories pc ON pc.category_id = c.id
             WHERE pc.post_id = $1
             ORDER BY c.name ASC"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Attach a category to a post. Idempotent.
    pub async fn attach(
        pool: &PgPool,
        post_id: DbId,
        category_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO post_categories (post_id, category_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_post_categories_pair DO NOTHING",
        )
        .bind(post_id)
        .bind(category_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Detach a category from a post. Returns `true` if an association existed.
    pub async fn detach(
        pool: &PgPool,
        post_id: DbId,
        category_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM post_categories WHERE post_id = $1 AND category_id = $2")
                .bind(post_id)
                .bind(category_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
