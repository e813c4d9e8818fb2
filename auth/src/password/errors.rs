use thiserror::Error;

/// Failures of the hashing machinery itself.
///
/// A wrong password is not an error; see [`super::PasswordHasher::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    /// Salt generation or the Argon2 computation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash could not be parsed or used
    #[error("Stored password hash unusable: {0}")]
    VerificationFailed(String),
}
