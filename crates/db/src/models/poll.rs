//! Poll models and DTOs.

use chrono::NaiveDate;
use mindscribe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `polls` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Poll {
    pub id: DbId,
    pub post_id: DbId,
    pub created_by: DbId,
    pub question: String,
    pub ends_on: NaiveDate,
    pub created_at: Timestamp,
}

/// A row from the `poll_choices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PollChoice {
    pub id: DbId,
    pub poll_id: DbId,
    pub choice_text: String,
    pub votes: i32,
}

/// DTO for creating a poll with its choices.
#[derive(Debug, Deserialize)]
pub struct CreatePoll {
    pub post_id: DbId,
    pub question: String,
    pub choices: Vec<String>,
    pub ends_on: NaiveDate,
}

/// DTO for casting a vote.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub choice_id: DbId,
}

/// A poll together with its choices, for result listings.
#[derive(Debug, Serialize)]
pub struct PollResults {
    #[serde(flatten)]
    pub poll: Poll,
    pub choices: Vec<PollChoice>,
}
