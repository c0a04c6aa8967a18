//! HS256 bearer token issuing and verification.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::server::error::{auth::AuthError, AppError};
use entity::enums::UserRole;

/// Claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expires_in_secs: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, expires_in_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_secs,
        }
    }

    /// Issues a token for the user that expires after the configured lifetime.
    pub fn issue(&self, user_id: i32, role: UserRole) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now,
            exp: now + self.expires_in_secs,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Decodes and validates a token.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Signature and expiry are valid
    /// - `Err(AuthError::TokenExpired)` - Token is past its `exp`
    /// - `Err(AuthError::InvalidToken)` - Any other decoding failure
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let keys = JwtKeys::new("secret", 3600);

        let token = keys.issue(7, UserRole::Warehouse).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, UserRole::Warehouse);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        // Past the default 60 second leeway
        let keys = JwtKeys::new("secret", -600);

        let token = keys.issue(1, UserRole::Admin).unwrap();

        assert!(matches!(keys.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = JwtKeys::new("one", 3600).issue(1, UserRole::Admin).unwrap();

        let result = JwtKeys::new("two", 3600).verify(&token);

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_is_invalid() {
        let keys = JwtKeys::new("secret", 3600);

        assert!(matches!(
            keys.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
