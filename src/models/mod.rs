//! Data models for the Biblio catalog

pub mod author;
pub mod book;
pub mod user;

// Re-export commonly used types
pub use author::{Author, AuthorPayload};
pub use book::{Book, BookPayload};
pub use user::{User, UserClaims};
