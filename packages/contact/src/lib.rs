// ABOUTME: Contact form messages sent by signed-in readers
// ABOUTME: Messages are stored for admins to review; nothing is mailed

pub mod storage;
pub mod types;

pub use storage::ContactStorage;
pub use types::{ContactInput, ContactMessage};
