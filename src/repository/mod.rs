//! UserRepository trait: the boundary to the remote directory service.
//!
//! Decouples the console from the transport so tests can substitute an
//! in-memory implementation.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{User, UserDraft, UserId, UserList};

pub use http::HttpUserRepository;

/// A failed repository call: optional status code and a readable message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct RepositoryError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
}

impl RepositoryError {
    pub fn new(code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// A failure that never got a response (connect, timeout, decode).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    pub fn not_found(id: &UserId) -> Self {
        Self::new(Some(404), format!("User #{id} not found."))
    }
}

/// Remote persistence for user records.
///
/// Every call is one round trip and may fail with a [`RepositoryError`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every user.
    async fn list_users(&self) -> Result<UserList, RepositoryError>;

    /// Fetch one user; fails when no record matches `id`.
    async fn find_user(&self, id: &UserId) -> Result<User, RepositoryError>;

    /// Create a user. The server assigns the id.
    async fn add_user(&self, draft: &UserDraft) -> Result<User, RepositoryError>;

    /// Replace the editable fields of a user.
    async fn edit_user(&self, id: &UserId, draft: &UserDraft) -> Result<User, RepositoryError>;

    /// Delete a user and return the removed record.
    async fn delete_user(&self, id: &UserId) -> Result<User, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_displays_message_only() {
        let err = RepositoryError::new(Some(500), "boom");
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.code, Some(500));
    }

    #[test]
    fn error_body_fields_are_optional() {
        let err: RepositoryError = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert_eq!(err, RepositoryError::transport("nope"));
        let err: RepositoryError = serde_json::from_str("{}").unwrap();
        assert!(err.message.is_empty());
    }

    #[test]
    fn not_found_names_the_id() {
        let err = RepositoryError::not_found(&UserId::Number(9));
        assert_eq!(err.code, Some(404));
        assert!(err.message.contains("#9"));
    }
}
