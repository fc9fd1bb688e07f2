use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{MAX_MOOD_LABEL_CHARS, MAX_NOTE_CHARS, MAX_USER_ID_CHARS, MAX_USERNAME_CHARS};
use crate::error::{AppError, AppResult};

static IMAGE_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("valid image url pattern"));

/// Validates a user identifier and returns it trimmed.
///
/// Identity providers format subjects differently (`auth0|abc`, emails,
/// `provider:id`), so only emptiness and length are checked.
pub fn validate_user_id<'a>(field: &str, user_id: &'a str) -> AppResult<&'a str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > MAX_USER_ID_CHARS {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_USER_ID_CHARS
        )));
    }
    Ok(trimmed)
}

/// Non-empty check for a mood used as a lookup or connection label.
/// Only new posts are held to the label length cap.
pub fn require_mood(mood: &str) -> AppResult<&str> {
    let trimmed = mood.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("mood is required"));
    }
    Ok(trimmed)
}

/// Validates a mood label and returns it trimmed.
pub fn validate_mood(mood: &str) -> AppResult<&str> {
    let trimmed = mood.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("mood is required"));
    }
    if trimmed.chars().count() > MAX_MOOD_LABEL_CHARS {
        return Err(AppError::validation(format!(
            "mood must be at most {} characters",
            MAX_MOOD_LABEL_CHARS
        )));
    }
    Ok(trimmed)
}

pub fn validate_note(note: Option<String>) -> AppResult<Option<String>> {
    let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    if let Some(n) = &note {
        if n.chars().count() > MAX_NOTE_CHARS {
            return Err(AppError::validation(format!(
                "note must be at most {} characters",
                MAX_NOTE_CHARS
            )));
        }
    }
    Ok(note)
}

/// Media is uploaded by the client beforehand; only an http(s) URL is stored.
pub fn validate_image_url(url: Option<String>) -> AppResult<Option<String>> {
    let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
    if let Some(u) = &url {
        if !IMAGE_URL_PATTERN.is_match(u) {
            return Err(AppError::validation("imageUrl must be an http(s) URL"));
        }
    }
    Ok(url)
}

pub fn validate_username(field: &str, username: &str) -> AppResult<()> {
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_USERNAME_CHARS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_validation() {
        assert_eq!(validate_user_id("userId", "  u1 ").unwrap(), "u1");
        assert!(validate_user_id("userId", "").is_err());
        assert!(validate_user_id("userId", "   ").is_err());
        assert!(validate_user_id("userId", &"x".repeat(MAX_USER_ID_CHARS + 1)).is_err());
    }

    #[test]
    fn test_provider_subject_formats_accepted() {
        for sub in ["auth0|abc", "google-oauth2|1234", "user@example.com", "firebase:Ab.c_9"] {
            assert_eq!(validate_user_id("userId", sub).unwrap(), sub);
        }
    }

    #[test]
    fn test_require_mood_has_no_length_cap() {
        let long = "m".repeat(MAX_MOOD_LABEL_CHARS + 10);
        assert_eq!(require_mood(&long).unwrap(), long);
        assert!(require_mood("  ").is_err());
    }

    #[test]
    fn test_mood_validation() {
        assert_eq!(validate_mood(" calm ").unwrap(), "calm");
        assert!(validate_mood("").is_err());
        assert!(validate_mood(&"x".repeat(MAX_MOOD_LABEL_CHARS + 1)).is_err());
    }

    #[test]
    fn test_optional_fields_blank_to_none() {
        assert_eq!(validate_note(Some("  ".to_string())).unwrap(), None);
        assert_eq!(validate_image_url(None).unwrap(), None);
        assert!(validate_image_url(Some("ftp://x".to_string())).is_err());
        assert!(validate_image_url(Some("https://a b".to_string())).is_err());
        assert!(validate_image_url(Some("https://res.cloudinary.com/x.jpg".to_string())).is_ok());
        assert!(validate_note(Some("n".repeat(MAX_NOTE_CHARS + 1))).is_err());
    }
}
