//! Mindscribe event bus and notification infrastructure.
//!
//! Building blocks for the platform-wide event system:
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`] — the canonical domain event envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `events` table.
//! - [`delivery`] — email notification channel for collaboration invites.

pub mod bus;
pub mod delivery;
pub mod persistence;

pub use bus::{event_types, DomainEvent, EventBus};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use persistence::EventPersistence;
