//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod ai;
pub mod collaboration;
pub mod comment;
pub mod event;
pub mod live_stream;
pub mod poll;
pub mod post;
pub mod quiz;
pub mod session;
pub mod taxonomy;
pub mod translation;
pub mod user;
