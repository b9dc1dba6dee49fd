// ABOUTME: Core types, validation, and utilities for Quill
// ABOUTME: Foundational package shared by every other Quill package

pub mod constants;
pub mod utils;
pub mod validation;

// Re-export constants
pub use constants::{default_database_path, quill_dir, SESSION_COOKIE_NAME};

// Re-export utilities
pub use utils::{avatar_url, format_post_date, normalize_email};

// Re-export validation
pub use validation::{
    truncate, validate_comment_text, validate_contact_message, validate_email, validate_name,
    validate_password, validate_post_fields, ValidationError,
};
