//! Authentication error type.

use thiserror::Error;

use namo_core::EmailError;

use super::token::TokenError;
use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately one variant so the
    /// response can't be used to probe which emails exist.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The email is already registered.
    #[error("email already registered")]
    UserAlreadyExists,

    /// The password doesn't meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// The email format is invalid.
    #[error("invalid email address: {0}")]
    InvalidEmail(#[from] EmailError),

    /// No bearer token was presented.
    #[error("no token provided")]
    MissingToken,

    /// The bearer token failed verification.
    #[error("invalid or expired token")]
    InvalidToken(#[from] TokenError),

    /// The token is valid but the account is not an administrator.
    #[error("administrator credentials required")]
    NotAdmin,

    /// Password hashing failed.
    #[error("failed to hash password")]
    PasswordHash,

    /// Database operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
