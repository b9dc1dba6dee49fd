// ABOUTME: Server-side session module
// ABOUTME: Session records and the storage that issues and resolves them

pub mod storage;
pub mod types;

pub use storage::SessionStorage;
pub use types::{Session, SessionToken};
