//! Poll and quiz input validation.
//!
//! Polls are counters behind a question; quizzes add a correct-answer flag
//! per choice. Both close at a fixed end date, checked lazily on access.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Minimum number of choices a poll or quiz must offer.
pub const MIN_CHOICES: usize = 2;

/// Maximum number of choices a poll or quiz may offer.
pub const MAX_CHOICES: usize = 20;

/// Validate a poll/quiz question (non-empty, <= 500 chars).
pub fn validate_question(question: &str) -> Result<(), CoreError> {
    if question.trim().is_empty() {
        return Err(CoreError::Validation("Question must not be empty".into()));
    }
    if question.len() > 500 {
        return Err(CoreError::Validation(
            "Question must be at most 500 characters".into(),
        ));
    }
    Ok(())
}

/// Validate poll choice texts: bounds on count, no blank entries.
pub fn validate_choices(choices: &[String]) -> Result<(), CoreError> {
    if choices.len() < MIN_CHOICES {
        return Err(CoreError::Validation(format!(
            "At least {MIN_CHOICES} choices are required"
        )));
    }
    if choices.len() > MAX_CHOICES {
        return Err(CoreError::Validation(format!(
            "At most {MAX_CHOICES} choices are allowed"
        )));
    }
    if choices.iter().any(|c| c.trim().is_empty()) {
        return Err(CoreError::Validation("Choices must not be blank".into()));
    }
    Ok(())
}

/// Validate that the end date lies strictly in the future.
pub fn validate_end_date(ends_on: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if ends_on <= today {
        return Err(CoreError::Validation(
            "End date must be in the future".into(),
        ));
    }
    Ok(())
}

/// Returns `true` once the poll/quiz end date has passed.
pub fn has_ended(ends_on: NaiveDate, today: NaiveDate) -> bool {
    ends_on < today
}

/// Validate quiz choices: the usual choice rules plus exactly one correct
/// answer.
pub fn validate_quiz_choices(choices: &[(String, bool)]) -> Result<(), CoreError> {
    let texts: Vec<String> = choices.iter().map(|(text, _)| text.clone()).collect();
    validate_choices(&texts)?;

    let correct = choices.iter().filter(|(_, is_correct)| *is_correct).count();
    if correct != 1 {
        return Err(CoreError::Validation(
            "Exactly one choice must be marked correct".into(),
        ));
    }
    Ok(())
}
