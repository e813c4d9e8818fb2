use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer stamped into every token and required on decode.
pub const ISSUER: &str = "taskhub";

/// Access tokens live for 15 minutes.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;

/// Refresh tokens live for 7 days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Payload of a short-lived access token.
///
/// Unknown fields are rejected so a refresh token can never be parsed as an
/// access token (and the reverse, see [`RefreshClaims`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AccessClaims {
    /// Authenticated user identifier (UUID string)
    pub user_id: String,

    /// Email of the user at issuance time
    pub email: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Issuer, always [`ISSUER`]
    pub iss: String,

    /// Unique token identifier
    pub jti: String,
}

impl AccessClaims {
    /// Build access claims issued at `issued_at`, expiring
    /// [`ACCESS_TOKEN_TTL_MINUTES`] later.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - User email
    /// * `issued_at` - Issuance instant
    pub fn new(user_id: impl ToString, email: impl ToString, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES);

        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            exp: expiration.timestamp(),
            iat: issued_at.timestamp(),
            iss: ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Payload of a long-lived refresh token. Only usable to mint new token pairs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    pub user_id: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub jti: String,
}

impl RefreshClaims {
    /// Build refresh claims issued at `issued_at`, expiring
    /// [`REFRESH_TOKEN_TTL_DAYS`] later.
    pub fn new(user_id: impl ToString, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + Duration::days(REFRESH_TOKEN_TTL_DAYS);

        Self {
            user_id: user_id.to_string(),
            exp: expiration.timestamp(),
            iat: issued_at.timestamp(),
            iss: ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}
