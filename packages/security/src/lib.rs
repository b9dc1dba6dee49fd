// ABOUTME: Authentication primitives for Quill
// ABOUTME: Password hashing, user account storage, and server-side sessions

pub mod password;
pub mod sessions;
pub mod users;

// Re-export main types for convenience
pub use password::{hash_password, verify_password, PasswordError};
pub use sessions::{Session, SessionStorage, SessionToken};
pub use users::{AccountUpdateInput, LoginFailure, User, UserCreateInput, UserProfile, UserStorage};
