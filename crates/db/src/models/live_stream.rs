//! Live-stream metadata model and DTOs.

use mindscribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `live_streams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LiveStream {
    pub id: DbId,
    pub post_id: DbId,
    pub host_id: DbId,
    pub title: String,
    pub stream_url: String,
    pub scheduled_start: Option<Timestamp>,
    pub is_live: bool,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering stream metadata on a post.
#[derive(Debug, Deserialize)]
pub struct CreateLiveStream {
    pub post_id: DbId,
    pub title: String,
    pub stream_url: String,
    pub scheduled_start: Option<Timestamp>,
}

/// DTO for updating stream metadata.
#[derive(Debug, Deserialize)]
pub struct UpdateLiveStream {
    pub title: Option<String>,
    pub stream_url: Option<String>,
    pub scheduled_start: Option<Timestamp>,
}
