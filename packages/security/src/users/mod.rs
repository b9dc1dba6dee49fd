// ABOUTME: User account module
// ABOUTME: Provides types and storage for registered users

pub mod storage;
pub mod types;


pub use storage::UserStorage;
pub use types::*;
