use crate::types::DbId;

/// Closed error enumeration for the whole platform.
///
/// Every failure the domain can produce falls into one of these kinds; the
/// API boundary maps each kind deterministically to an HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An external collaborator (LLM API, SMTP) failed or timed out.
    #[error("External service error: {0}")]
    External(String),

    /// Quiz submission failure carrying the HTTP status it should surface as.
    #[error("Quiz submission failed: {message}")]
    QuizSubmission { message: String, status: u16 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a 400-status quiz submission failure.
    pub fn quiz_submission(message: impl Into<String>) -> Self {
        CoreError::QuizSubmission {
            message: message.into(),
            status: 400,
        }
    }
}
