//! Domain logic shared across the Mindscribe workspace.
//!
//! This crate has no internal dependencies so the database layer, API
//! handlers, and background services can all reference the same types,
//! error enum, role constants, and validation rules.

pub mod collaboration;
pub mod content;
pub mod error;
pub mod poll;
pub mod roles;
pub mod translation;
pub mod types;
