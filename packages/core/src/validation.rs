// ABOUTME: Input validation for users, posts, and comments
// ABOUTME: Length limits mirror the column sizes in the database schema

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::constants::{MAX_COMMENT_LEN, MAX_POST_FIELD_LEN, MAX_USER_FIELD_LEN, MIN_PASSWORD_LEN};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Empty(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Nothing to update: provide a name or a password")]
    NothingToUpdate,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex")
    })
}

fn require(field: &'static str, value: &str, max: Option<usize>) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    if let Some(max) = max {
        if value.chars().count() > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    require("Email", email, Some(MAX_USER_FIELD_LEN))?;
    if !email_regex().is_match(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    require("Name", name, Some(MAX_USER_FIELD_LEN))
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Empty("Password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

/// Validate every field of a post before it is created or edited
pub fn validate_post_fields(
    title: &str,
    subtitle: &str,
    img_url: &str,
    body: &str,
) -> Result<(), ValidationError> {
    require("Title", title, Some(MAX_POST_FIELD_LEN))?;
    require("Subtitle", subtitle, Some(MAX_POST_FIELD_LEN))?;
    require("Image URL", img_url, Some(MAX_POST_FIELD_LEN))?;
    require("Body", body, None)?;

    let parsed =
        Url::parse(img_url.trim()).map_err(|_| ValidationError::InvalidUrl(img_url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl(img_url.to_string()));
    }
    Ok(())
}

pub fn validate_comment_text(text: &str) -> Result<(), ValidationError> {
    require("Comment", text, Some(MAX_COMMENT_LEN))
}

pub fn validate_contact_message(message: &str) -> Result<(), ValidationError> {
    require("Message", message, Some(MAX_COMMENT_LEN))
}

/// Truncate a string to at most `max` characters, appending an ellipsis when cut
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let cut: String = value.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
