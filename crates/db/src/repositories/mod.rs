//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod ai_repo;
pub mod collaboration_repo;
pub mod comment_repo;
pub mod event_repo;
pub mod invite_repo;
pub mod live_stream_repo;
pub mod poll_repo;
pub mod post_repo;
pub mod quiz_repo;
pub mod session_repo;
pub mod taxonomy_repo;
pub mod translation_repo;
pub mod user_repo;
pub mod version_repo;

pub use activity_repo::ActivityRepo;
pub use ai_repo::AiRepo;
pub use collaboration_repo::CollaborationRepo;
pub use comment_repo::CommentRepo;
pub use event_repo::EventRepo;
pub use invite_repo::InviteRepo;
pub use live_stream_repo::LiveStreamRepo;
pub use poll_repo::PollRepo;
pub use post_repo::PostRepo;
pub use quiz_repo::QuizRepo;
pub use session_repo::SessionRepo;
pub use taxonomy_repo::{CategoryRepo, TagRepo};
pub use translation_repo::TranslationRepo;
pub use user_repo::UserRepo;
pub use version_repo::VersionRepo;
