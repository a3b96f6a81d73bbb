//! Domain service for user records.
//!
//! Registration issues a bearer token; lookups, updates and deletes resolve
//! the first live record with a matching username.

use thiserror::Error;

use crate::models::user::{PublicUser, User, UserPayload};
use crate::services::token::TokenError;

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Signing error: {0}")]
    Signing(String),
}

impl UserError {
    #[must_use]
    pub fn user_not_found() -> Self {
        Self::NotFound("User not found".to_string())
    }

    /// Wraps a store failure as its outermost context plus the root cause.
    ///
    /// sqlx repeats the driver message at every level of the chain, so the
    /// intermediate causes are dropped.
    #[must_use]
    pub fn storage(err: &anyhow::Error) -> Self {
        let context = err.to_string();
        let root = err.root_cause().to_string();

        if context == root {
            Self::Storage(context)
        } else {
            Self::Storage(format!("{context}: {root}"))
        }
    }
}

impl From<TokenError> for UserError {
    fn from(err: TokenError) -> Self {
        Self::Signing(err.to_string())
    }
}

/// Domain service trait for user records.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Registers a user and returns the token issued for it.
    ///
    /// Duplicate usernames are accepted and produce separate records.
    async fn create(&self, payload: UserPayload) -> Result<String, UserError>;

    /// Deletes the first record whose username matches `username`.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] if no live record matches.
    async fn delete_by_username(&self, username: &str) -> Result<(), UserError>;

    /// Merges the non-empty fields of `payload` onto the first record with
    /// the payload's username and returns the result.
    async fn update_by_username(&self, payload: UserPayload) -> Result<User, UserError>;

    /// Looks up the first matching record, without its password.
    async fn get_by_username(&self, username: &str) -> Result<PublicUser, UserError>;

    /// Every live record, passwords included.
    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}
