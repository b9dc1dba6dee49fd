// ABOUTME: Blog post management for Quill
// ABOUTME: Provides types and storage layer for posts written by the admin

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::PostStorage;
pub use types::{Post, PostInput};
