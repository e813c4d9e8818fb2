use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Argon2id PHC string at the default cost with an all-zero digest. Nothing
/// realistically verifies against it.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication coordinator combining password verification and token issuance.
///
/// Owns the shared signing secret (through its [`JwtHandler`]); construct one
/// per process and share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Access and refresh token issued together for one user.
///
/// Handed to the caller once and never stored server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry (Unix timestamp)
    pub expires_at: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a fresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identifier written into both tokens
    /// * `email` - Email written into the access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
        email: &str,
    ) -> Result<TokenPair, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token_pair(user_id, email)?)
    }

    /// Run one full verification for a login with no matching account, so it
    /// costs the same as a wrong password. Always `false`.
    pub fn verify_decoy(&self, password: &str) -> bool {
        self.password_hasher
            .verify(password, DECOY_HASH)
            .unwrap_or(false)
    }

    /// Issue an access/refresh pair stamped with the current time.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_token_pair(
        &self,
        user_id: impl ToString,
        email: &str,
    ) -> Result<TokenPair, JwtError> {
        self.issue_token_pair_at(user_id, email, Utc::now())
    }

    /// Issue an access/refresh pair as if issued at `issued_at`.
    ///
    /// Both tokens share the same issued-at instant but have independent
    /// expiries.
    pub fn issue_token_pair_at(
        &self,
        user_id: impl ToString,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<TokenPair, JwtError> {
        let user_id = user_id.to_string();
        let access_claims = AccessClaims::new(&user_id, email, issued_at);
        let refresh_claims = RefreshClaims::new(&user_id, issued_at);

        let access_token = self.jwt_handler.encode(&access_claims)?;
        let refresh_token = self.jwt_handler.encode(&refresh_claims)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at: access_claims.exp,
        })
    }

    /// Validate and decode an access token.
    ///
    /// # Errors
    /// * `Expired` / `InvalidSignature` / `Malformed` - see [`JwtHandler::decode`]
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Validate and decode a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(SECRET);

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let tokens = authenticator
            .authenticate(password, &hash, "user123", "alice@x.com")
            .expect("Authentication failed");

        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());

        let decoded = authenticator
            .validate_access_token(&tokens.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.user_id, "user123");
        assert_eq!(decoded.email, "alice@x.com");
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(SECRET);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "user123", "alice@x.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_corrupt_hash() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.authenticate("pw", "not-a-phc-string", "user123", "a@x.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::PasswordError(_))
        ));
    }

    #[test]
    fn test_decoy_hash_is_verifiable_and_never_matches() {
        let authenticator = Authenticator::new(SECRET);

        assert_eq!(
            PasswordHasher::new().verify("my_password", DECOY_HASH),
            Ok(false)
        );
        assert!(!authenticator.verify_decoy("my_password"));
        assert!(!authenticator.verify_decoy(""));
    }

    #[test]
    fn test_token_pair_expiries() {
        let authenticator = Authenticator::new(SECRET);
        let now = Utc::now().timestamp();

        let tokens = authenticator
            .issue_token_pair("user123", "alice@x.com")
            .expect("Failed to issue tokens");

        let access = authenticator
            .validate_access_token(&tokens.access_token)
            .unwrap();
        let refresh = authenticator
            .validate_refresh_token(&tokens.refresh_token)
            .unwrap();

        assert!(tokens.expires_at > now);
        assert_eq!(tokens.expires_at, access.exp);
        assert!(access.exp < refresh.exp);
        assert_eq!(access.iat, refresh.iat);
        assert_eq!(access.user_id, refresh.user_id);
    }

    #[test]
    fn test_backdated_pair_has_expired_access_but_live_refresh() {
        let authenticator = Authenticator::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(1);

        let tokens = authenticator
            .issue_token_pair_at("user123", "alice@x.com", issued_at)
            .expect("Failed to issue tokens");

        assert_eq!(
            authenticator.validate_access_token(&tokens.access_token),
            Err(JwtError::Expired)
        );
        assert!(authenticator
            .validate_refresh_token(&tokens.refresh_token)
            .is_ok());
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(SECRET);

        let result = authenticator.validate_access_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }
}
