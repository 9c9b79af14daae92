//! Language codes for multi-language content.

use crate::error::CoreError;

/// ISO 639-1 codes the platform accepts for content and translations.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "es", "fr", "de", "it", "pt", "nl", "ru", "zh", "ja", "ko", "ar", "hi", "tr",
];

/// Default language for new content and accounts.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Validate a language code against the supported set.
pub fn validate_language(code: &str) -> Result<(), CoreError> {
    if !SUPPORTED_LANGUAGES.contains(&code) {
        return Err(CoreError::Validation(format!(
            "Unsupported language '{}'. Supported: {}",
            code,
            SUPPORTED_LANGUAGES.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_pass() {
        assert!(validate_language("en").is_ok());
        assert!(validate_language("ja").is_ok());
    }

    #[test]
    fn unknown_or_uppercase_codes_fail() {
        assert!(validate_language("klingon").is_err());
        assert!(validate_language("EN").is_err());
    }
}
