//! Domain service for user identity and authentication.
//!
//! Handles registration, password verification and the bounded login history.

use thiserror::Error;

use crate::models::user::{NewUser, User};

/// Errors returned by [`CredentialStore::register_user`].
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("User Name already taken: {0}")]
    DuplicateUserName(String),

    #[error("There was an error creating the user: {0}")]
    Persistence(String),
}

/// Errors returned by [`CredentialStore::check_user`].
///
/// `UserNotFound` and `IncorrectPassword` stay distinct so the cause can be logged; callers
/// are free to show both as one message.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unable to find user: {0}")]
    UserNotFound(String),

    #[error("Incorrect Password for user: {0}")]
    IncorrectPassword(String),

    #[error("There was an error verifying the user: {0}")]
    Persistence(String),
}

/// Domain service trait for credentials.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Hashes the password and stores a new user with an empty login history.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::PasswordMismatch`] before doing any work when the two
    /// passwords differ, and [`RegistrationError::DuplicateUserName`] when the store rejects
    /// the name as taken.
    async fn register_user(&self, candidate: NewUser) -> Result<(), RegistrationError>;

    /// Verifies credentials and records the login.
    ///
    /// The returned user already carries the new history entry; it is only returned once
    /// that entry has been persisted.
    async fn check_user(
        &self,
        user_name: &str,
        password: &str,
        client_agent: &str,
    ) -> Result<User, AuthError>;
}
