//! Thin client for the OpenAI chat-completion API.
//!
//! Wraps the HTTP surface the content assistant needs: topic
//! suggestions, content analysis, and writing improvement. The client is
//! optional at runtime; when `OPENAI_API_KEY` is absent the API serves
//! 503 for assistant routes and everything else works normally.

pub mod client;

pub use client::{AiClient, AiConfig, AiError, TopicSuggestion};
