// ABOUTME: Reader comments attached to blog posts
// ABOUTME: Comment types and SQLite-backed storage

pub mod storage;
pub mod types;

pub use storage::CommentStorage;
pub use types::{Comment, CommentInput};
