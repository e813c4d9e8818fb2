use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use super::claims::ISSUER;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type so access and refresh payloads share one codec.
/// Signs with HS256 and accepts nothing else on decode.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token into the expected claims shape.
    ///
    /// The signature is checked before anything else, then the payload is
    /// parsed as `T`, then `exp` and `iss` are validated with zero leeway.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature mismatch or algorithm other than HS256
    /// * `Expired` - Current time is past the `exp` claim
    /// * `Malformed` - Any other structural problem, including the wrong shape
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        self.check_algorithm(token)?;
        let token_data = decode::<T>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }

    /// Reject any header whose `alg` is not ours, including names such as
    /// `none` that jsonwebtoken cannot parse into an [`Algorithm`].
    fn check_algorithm(&self, token: &str) -> Result<(), JwtError> {
        match decode_header(token) {
            Ok(header) if header.alg == self.algorithm => Ok(()),
            Ok(header) => Err(JwtError::InvalidSignature(format!(
                "Unexpected algorithm {:?}",
                header.alg
            ))),
            Err(err) => match raw_algorithm(token) {
                Some(alg) if alg.parse::<Algorithm>().ok() != Some(self.algorithm) => Err(
                    JwtError::InvalidSignature(format!("Unexpected algorithm {}", alg)),
                ),
                _ => Err(err.into()),
            },
        }
    }
}

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// `alg` of a header segment that decodes as JSON but not as a [`Header`].
fn raw_algorithm(token: &str) -> Option<String> {
    let segment = token.split('.').next()?;
    let bytes = URL_SAFE_NO_PAD.decode(segment).ok()?;
    let header: RawHeader = serde_json::from_slice(&bytes).ok()?;

    Some(header.alg)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::jwt::claims::AccessClaims;
    use crate::jwt::claims::RefreshClaims;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = AccessClaims::new("user123", "alice@x.com", Utc::now());

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded: AccessClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode::<AccessClaims>("invalid.token.here");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let claims = AccessClaims::new("user123", "alice@x.com", Utc::now());
        let token = handler1.encode(&claims).expect("Failed to encode token");

        let result = handler2.decode::<AccessClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_rejects_other_hmac_algorithm() {
        let handler = JwtHandler::new(SECRET);
        let claims = AccessClaims::new("user123", "alice@x.com", Utc::now());

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .expect("Failed to encode token");

        let result = handler.decode::<AccessClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    fn unsigned_token(alg: &str, claims: &AccessClaims) -> String {
        let header = json!({ "alg": alg, "typ": "JWT" }).to_string();
        let payload = serde_json::to_string(claims).expect("Failed to serialize claims");

        format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_rejects_alg_none() {
        let handler = JwtHandler::new(SECRET);
        let claims = AccessClaims::new("user123", "alice@x.com", Utc::now());

        let result = handler.decode::<AccessClaims>(&unsigned_token("none", &claims));
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_rejects_unknown_algorithm_name() {
        let handler = JwtHandler::new(SECRET);
        let claims = AccessClaims::new("user123", "alice@x.com", Utc::now());

        let result = handler.decode::<AccessClaims>(&unsigned_token("XYZ", &claims));
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_decode_header_without_alg_is_malformed() {
        let handler = JwtHandler::new(SECRET);
        let token = format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode("{}")
        );

        let result = handler.decode::<AccessClaims>(&token);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let issued_at = Utc::now() - Duration::hours(1);
        let claims = AccessClaims::new("user123", "alice@x.com", issued_at);

        let token = handler.encode(&claims).expect("Failed to encode token");

        let result = handler.decode::<AccessClaims>(&token);
        assert_eq!(result, Err(JwtError::Expired));
    }

    #[test]
    fn test_expired_token_with_wrong_secret_is_invalid_signature() {
        let issued_at = Utc::now() - Duration::hours(1);
        let claims = AccessClaims::new("user123", "alice@x.com", issued_at);
        let token = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!")
            .encode(&claims)
            .expect("Failed to encode token");

        let result =
            JwtHandler::new(b"secret2_at_least_32_bytes_long_key!").decode::<AccessClaims>(&token);
        assert!(matches!(result, Err(JwtError::InvalidSignature(_))));
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let handler = JwtHandler::new(SECRET);
        let now = Utc::now();

        let refresh = handler
            .encode(&RefreshClaims::new("user123", now))
            .expect("Failed to encode token");
        let access = handler
            .encode(&AccessClaims::new("user123", "alice@x.com", now))
            .expect("Failed to encode token");

        assert!(matches!(
            handler.decode::<AccessClaims>(&refresh),
            Err(JwtError::Malformed(_))
        ));
        assert!(matches!(
            handler.decode::<RefreshClaims>(&access),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_rejects_foreign_issuer() {
        let handler = JwtHandler::new(SECRET);
        let mut claims = AccessClaims::new("user123", "alice@x.com", Utc::now());
        claims.iss = "someone-else".to_string();

        let token = handler.encode(&claims).expect("Failed to encode token");

        let result = handler.decode::<AccessClaims>(&token);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_requires_expiration() {
        let handler = JwtHandler::new(SECRET);
        let token = handler
            .encode(&json!({ "user_id": "user123", "iss": ISSUER }))
            .expect("Failed to encode token");

        let result = handler.decode::<serde_json::Value>(&token);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }
}
