// ABOUTME: Shared utility functions for Quill
// ABOUTME: Post date stamping, email normalization, avatar URLs

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Gravatar endpoint used for commenter avatars
const AVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Format the display date stamped on a post, e.g. "October 15, 2026"
pub fn format_post_date(at: DateTime<Utc>) -> String {
    at.format("%B %d, %Y").to_string()
}

/// Canonical form of an email address used for storage and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Build the avatar URL for an email address.
///
/// Size 100, rating "g", "retro" fallback image.
pub fn avatar_url(email: &str) -> String {
    let digest = Sha256::digest(normalize_email(email).as_bytes());
    format!(
        "{}/{}?s=100&d=retro&r=g",
        AVATAR_BASE_URL,
        hex::encode(digest)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_post_date() {
        let at = Utc.with_ymd_and_hms(2026, 10, 5, 12, 0, 0).unwrap();
        assert_eq!(format_post_date(at), "October 05, 2026");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_avatar_url_ignores_case_and_whitespace() {
        let a = avatar_url("ada@example.com");
        let b = avatar_url(" ADA@example.com ");
        assert_eq!(a, b);
        assert!(a.starts_with("https://www.gravatar.com/avatar/"));
        assert!(a.ends_with("?s=100&d=retro&r=g"));
    }

    #[test]
    fn test_avatar_url_hash_is_sha256_hex() {
        let url = avatar_url("ada@example.com");
        let hash = url
            .trim_start_matches("https://www.gravatar.com/avatar/")
            .split('?')
            .next()
            .unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
