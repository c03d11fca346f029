use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{MIN_NAME_LENGTH, MIN_SLUG_LENGTH};

lazy_static! {
    /// Shape of every slug the console sends to the catalog.
    /// Lowercase alphanumeric runs joined by single hyphens
    /// - Valid: "futbolki", "t-shirts", "size-xl-2024"
    /// - Invalid: "-tees", "tees-", "t--shirts", "Tees", "t_shirts"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Trim an operator-entered name and enforce the minimum length.
///
/// Length is counted in characters, so two Cyrillic letters pass.
pub fn normalized_name(raw: &str, label: &str) -> Result<String> {
    let name = raw.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            label, MIN_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}

/// Enforce the minimum slug length and the slug shape; `hint` explains what
/// the operator can change when the slug is too short.
pub fn checked_slug(slug: String, hint: &str) -> Result<String> {
    if slug.chars().count() < MIN_SLUG_LENGTH {
        return Err(AppError::Validation(format!(
            "Slug must be at least {} characters ({})",
            MIN_SLUG_LENGTH, hint
        )));
    }
    if !SLUG_REGEX.is_match(&slug) {
        return Err(AppError::Validation(
            "Slug may only contain lowercase latin letters, digits and single hyphens".to_string(),
        ));
    }
    Ok(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("futbolki"));
        assert!(SLUG_REGEX.is_match("t-shirts"));
        assert!(SLUG_REGEX.is_match("size-xl-2024"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-tees")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("tees-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("t--shirts")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Tees")); // uppercase
        assert!(!SLUG_REGEX.is_match("t_shirts")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_normalized_name_trims_and_counts_chars() {
        assert_eq!(normalized_name("  Худи ", "Name").unwrap(), "Худи");
        assert_eq!(normalized_name("Яя", "Name").unwrap(), "Яя");
        assert!(matches!(
            normalized_name(" a ", "Name"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_checked_slug_rejects_short_values() {
        assert_eq!(checked_slug("ab".to_string(), "x").unwrap(), "ab");
        let err = checked_slug("a".to_string(), "name too short").unwrap_err();
        assert!(err.user_message().contains("name too short"));
        assert!(checked_slug("Puma Sport".to_string(), "x").is_err());
    }
}
