//! Issuing and verifying HS256 access tokens.
//!
//! Verification distinguishes an expired token from every other failure so the
//! API can answer "Token expired" rather than a generic "Invalid token".
//!
//! # Example
//!
//! ```ignore
//! use learnhub_auth::{create_access_token, verify_token};
//!
//! let token = create_access_token(&user.base.id, &user.email, user.role, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! ```

use std::fmt;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use learnhub_config::JwtConfig;
use learnhub_core::{AppError, UserRole};

use crate::claims::Claims;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => write!(f, "Token expired"),
            Self::Invalid => write!(f, "Invalid token"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Creates an access token for the given user, valid for `JWT_EXPIRES_IN`.
pub fn create_access_token(
    user_id: &str,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let (iat, exp) = now
        .checked_add(jwt_config.expires_in_secs)
        .and_then(|exp| Some((usize::try_from(now).ok()?, usize::try_from(exp).ok()?)))
        .ok_or_else(|| AppError::internal(anyhow::anyhow!("Token expiry is out of range")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp,
        iat,
    };

    sign_claims(&claims, jwt_config)
}

/// Signs arbitrary claims with the configured secret.
pub fn sign_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test_secret_key_for_testing".to_string(),
            expires_in_secs: 3600,
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = get_test_jwt_config();
        let token = create_access_token("user-1", "alice@x.com", UserRole::Student, &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "alice@x.com");
        assert_eq!(claims.role, UserRole::Student);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expiry_overflow_is_internal_error() {
        let config = JwtConfig {
            expires_in_secs: i64::MAX,
            ..get_test_jwt_config()
        };

        let err = create_access_token("user-1", "alice@x.com", UserRole::Student, &config)
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_token_is_three_part_jwt() {
        let config = get_test_jwt_config();
        let token = create_access_token("user-1", "alice@x.com", UserRole::Coach, &config).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let config = get_test_jwt_config();
        let token = create_access_token("user-1", "alice@x.com", UserRole::Admin, &config).unwrap();

        let other = JwtConfig {
            secret: "another_secret".to_string(),
            ..config
        };
        assert_eq!(verify_token(&token, &other), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let config = get_test_jwt_config();
        assert_eq!(verify_token("not.a.token", &config), Err(TokenError::Invalid));
        assert_eq!(verify_token("", &config), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "alice@x.com".to_string(),
            role: UserRole::Student,
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = sign_claims(&claims, &config).unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err, TokenError::Expired);
        assert_eq!(err.to_string(), "Token expired");
    }
}
