//! Repository for the translation tables.
//!
//! Post translations carry full (title, content) pairs; tag and category
//! translations are single localized names. All three are upserts keyed
//! by (owner, language).

use sqlx::PgPool;

use mindscribe_core::types::DbId;

use crate::models::translation::{NameTranslation, PostTranslation};

/// Column list for post_translations queries.
const POST_COLUMNS: &str = "id, post_id, language, title, content, created_at, updated_at";

/// Provides upsert and lookup operations for all translation tables.
pub struct TranslationRepo;

impl TranslationRepo {
    /// Insert or replace a post translation for one language.
    pub async fn upsert_post(
        pool: &PgPool,
        post_id: DbId,
        language: &str,
        title: &str,
        content: &str,
    ) -> Result<PostTranslation, sqlx::Error> {
        let query = format!(
            "INSERT INTO post_translations (post_id, language, title, content)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_post_translations_lang
             DO UPDATE SET title = EXCLUDED.title, content = EXCLUDED.content
             RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as::<_, PostTranslation>(&query)
            .bind(post_id)
            .bind(language)
            .bind(title)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Get a post translation for one language, if present.
    pub async fn get_post(
        pool: &PgPool,
        post_id: DbId,
        language: &str,
    ) -> Result<Option<PostTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM post_translations
             WHERE post_id = $1 AND language = $2"
        );
        sqlx::query_as::<_, PostTranslation>(&query)
            .bind(post_id)
            .bind(language)
            .fetch_optional(pool)
            .await
    }

    /// List all translations for a post, ordered by language code.
    pub async fn list_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<PostTranslation>, sqlx::Error> {
        let query = format!(
            "SELECT {POST_COLUMNS} FROM post_translations
             WHERE post_id = $1
             ORDER BY language ASC"
        );
        sqlx::query_as::<_, PostTranslation>(&query)
            .bind(post_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a post translation. Returns `true` if a row was removed.
    pub async fn delete_post(
        pool: &PgPool,
        post_id: DbId,
        language: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM post_translations WHERE post_id = $1 AND language = $2")
                .bind(post_id)
                .bind(language)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert or replace a tag name translation.
    pub async fn upsert_tag(
        pool: &PgPool,
        tag_id: DbId,
        language: &str,
        name: &str,
    ) -> Result<NameTranslation, sqlx::Error> {
        sqlx::query_as::<_, NameTranslation>(
            "INSERT INTO tag_translations (tag_id, language, name)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_tag_translations_lang
             DO UPDATE SET name = EXCLUDED.name
             RETURNING id, tag_id AS owner_id, language, name",
        )
        .bind(tag_id)
        .bind(language)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// List all name translations for a tag.
    pub async fn list_for_tag(
        pool: &PgPool,
        tag_id: DbId,
    ) -> Result<Vec<NameTranslation>, sqlx::Error> {
        sqlx::query_as::<_, NameTranslation>(
            "SELECT id, tag_id AS owner_id, language, name FROM tag_translations
             WHERE tag_id = $1
             ORDER BY language ASC",
        )
        .bind(tag_id)
        .fetch_all(pool)
        .await
    }

    /// Insert or replace a category name translation.
    pub async fn upsert_category(
        pool: &PgPool,
        category_id: DbId,
        language: &str,
        name: &str,
    ) -> Result<NameTranslation, sqlx::Error> {
        sqlx::query_as::<_, NameTranslation>(
            "INSERT INTO category_translations (category_id, language, name)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_category_translations_lang
             DO UPDATE SET name = EXCLUDED.name
             RETURNING id, category_id AS owner_id, language, name",
        )
        .bind(category_id)
        .bind(language)
        .bind(name)
        .fetch_one(pool)
        .await
    }

    /// List all name translations for a category.
    pub async fn list_for_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<NameTranslation>, sqlx::Error> {
        sqlx::query_as::<_, NameTranslation>(
            "SELECT id, category_id AS owner_id, language, name FROM category_translations
             WHERE category_id = $1
             ORDER BY language ASC",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }
}
