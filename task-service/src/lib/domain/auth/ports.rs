use async_trait::async_trait;
use auth::AccessClaims;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;

/// Port for credential lifecycle operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated name, email and password
    ///
    /// # Returns
    /// Profile of the stored user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing or storage failed
    async fn register(&self, command: RegisterCommand) -> Result<UserProfile, AuthError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Storage failed or the stored hash is unusable
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Issue a fresh access/refresh pair for `user`.
    ///
    /// # Errors
    /// * `Internal` - Signing failed
    fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AuthError>;

    /// Decode and verify an access token. Does not consult the user store.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `InvalidToken` - Any other decoding or verification failure
    fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AuthError>;

    /// Exchange a refresh token for a brand-new token pair.
    ///
    /// The presented refresh token remains usable until its own expiry.
    ///
    /// # Errors
    /// * `TokenExpired` - Refresh token is past its expiry
    /// * `InvalidToken` - Token is invalid or its user no longer exists
    /// * `Internal` - Storage or signing failed
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
}
