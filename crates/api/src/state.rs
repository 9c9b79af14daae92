use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mindscribe_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing domain events.
    pub event_bus: Arc<mindscribe_events::EventBus>,
    /// LLM client; `None` when `OPENAI_API_KEY` is not configured.
    pub ai: Option<Arc<mindscribe_ai::AiClient>>,
    /// Email delivery; `None` when SMTP is not configured.
    pub email: Option<Arc<mindscribe_events::EmailDelivery>>,
}
