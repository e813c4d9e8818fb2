use auth::JwtError;
use thiserror::Error;

use crate::domain::auth::models::PasswordPolicyError;
use crate::domain::user::errors::DisplayNameError;
use crate::domain::user::errors::EmailError;

/// Top-level error type for credential lifecycle operations
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] DisplayNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Infrastructure errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            JwtError::InvalidSignature(_) | JwtError::Malformed(_) => AuthError::InvalidToken,
            JwtError::EncodingFailed(e) => AuthError::Internal(format!("Token signing failed: {}", e)),
        }
    }
}
