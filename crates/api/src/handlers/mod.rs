//! HTTP request handlers, grouped by resource.

pub mod ai;
pub mod auth;
pub mod collaboration;
pub mod comments;
pub mod polls;
pub mod posts;
pub mod quizzes;
pub mod streams;
pub mod taxonomy;
pub mod translations;
pub mod users;
