//! Repository for the durable `events` table.

use sqlx::PgPool;

use mindscribe_core::types::{DbId, Timestamp};

use crate::models::event::EventRecord;

/// Column list for events queries.
const COLUMNS: &str = "id, event_type, source_entity_type, source_entity_id, \
                       actor_user_id, payload, occurred_at, created_at";

/// Provides insert and read operations for persisted domain events.
pub struct EventRepo;

impl EventRepo {
    /// Persist one event.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        pool: &PgPool,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        payload: serde_json::Value,
        occurred_at: Timestamp,
    ) -> Result<EventRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (event_type, source_entity_type, source_entity_id,
                                 actor_user_id, payload, occurred_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(event_type)
            .bind(source_entity_type)
            .bind(source_entity_id)
            .bind(actor_user_id)
            .bind(payload)
            .bind(occurred_at)
            .fetch_one(pool)
            .await
    }

    /// List recent events, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<EventRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events ORDER BY occurred_at DESC LIMIT $1"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List events for one source entity, newest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Vec<EventRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE source_entity_type = $1 AND source_entity_id = $2
             ORDER BY occurred_at DESC"
        );
        sqlx::query_as::<_, EventRecord>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }
}
