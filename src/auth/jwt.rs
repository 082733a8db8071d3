//! JWT token handling

use crate::auth::models::Role;
use crate::error::{Error, Result};
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User role
    pub role: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Token id. HS256 signing is deterministic, so without this two tokens
    /// issued within the same second would be byte-identical.
    pub jti: String,
}

impl Claims {
    /// Create claims for a user with the given time-to-live
    pub fn new(user_id: &str, role: Role, ttl: Duration) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + ttl.num_seconds(),
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Get the user role, if the claim carries one we recognize
    pub fn role(&self) -> Option<Role> {
        Role::from_str(&self.role)
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() > self.exp
    }
}

/// Create a signed token for a user
pub fn create_token(user_id: &str, role: Role, secret: &str, ttl: Duration) -> Result<String> {
    let claims = Claims::new(user_id, role, ttl);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Config(format!("Failed to create token: {}", e)))
}

/// Validate and decode a token.
///
/// Expiry is enforced with zero leeway: a token is invalid from the instant
/// `exp` passes. Failures map onto the three decode failure kinds - expired,
/// bad signature (wrong secret or tampering), or unparseable.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => Error::Expired,
        ErrorKind::InvalidSignature => Error::InvalidSignature,
        _ => Error::MalformedCredential,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_create_and_validate_token() {
        let token = create_token("user-1", Role::Admin, SECRET, Duration::minutes(15))
            .expect("Failed to create token");
        let claims = validate_token(&token, SECRET).expect("Failed to validate token");

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.role(), Some(Role::Admin));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("user-1", Role::User, SECRET, Duration::minutes(15))
            .expect("Failed to create token");
        let result = validate_token(&token, "another-secret");
        assert!(matches!(result, Err(Error::InvalidSignature)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_token("user-1", Role::User, SECRET, Duration::seconds(-10))
            .expect("Failed to create token");
        let result = validate_token(&token, SECRET);
        assert!(matches!(result, Err(Error::Expired)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let result = validate_token("not-a-jwt-token", SECRET);
        assert!(matches!(result, Err(Error::MalformedCredential)));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = create_token("user-1", Role::User, SECRET, Duration::minutes(15))
            .expect("Failed to create token");
        let b = create_token("user-1", Role::User, SECRET, Duration::minutes(15))
            .expect("Failed to create token");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unrecognized_role_parses_to_none() {
        let claims = Claims {
            sub: "user-1".to_string(),
            role: "superuser".to_string(),
            iat: 0,
            exp: i64::MAX,
            jti: "jti".to_string(),
        };
        assert_eq!(claims.role(), None);
    }
}
