use std::env;
use std::path::PathBuf;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "quill_session";

/// Maximum length of user emails and names (matches the schema)
pub const MAX_USER_FIELD_LEN: usize = 100;

/// Maximum length of post titles, subtitles, and image URLs
pub const MAX_POST_FIELD_LEN: usize = 250;

/// Maximum length of a comment body
pub const MAX_COMMENT_LEN: usize = 5000;

/// Minimum password length accepted at registration and account update
pub const MIN_PASSWORD_LEN: usize = 8;

/// Get the path to the Quill directory (~/.quill)
pub fn quill_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".quill")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".quill")
    }
}

/// Get the default database path (~/.quill/quill.db)
pub fn default_database_path() -> PathBuf {
    quill_dir().join("quill.db")
}
