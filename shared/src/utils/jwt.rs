use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::models::claims::TokenClaims;

/// Masa berlaku token: 1 hari, mengikuti masa berlaku SPPA harian.
pub const TOKEN_EXPIRY_SECONDS: i64 = 86400;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token invalid atau expired")]
    InvalidToken,

    #[error("Gagal membuat token: {0}")]
    EncodeFailed(String),
}

/// Generate token login (HS256, expiry 1 hari) dengan JTI unik
pub fn generate_token(
    user_id: i32,
    email: &str,
    role: &str,
    jwt_secret: &str,
) -> Result<String, JwtError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(TOKEN_EXPIRY_SECONDS);

    let claims = TokenClaims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodeFailed(e.to_string()))
}

/// Validasi token dan extract claims jika valid
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<TokenClaims, JwtError> {
    let validation = Validation::default();

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| JwtError::InvalidToken)?;

    Ok(token_data.claims)
}

/// Extract bearer token dari Authorization header
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    auth_header
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-pitek-balap";

    #[test]
    fn test_generate_and_validate_token() {
        let token = generate_token(7, "siti@example.com", "Pembeli", TEST_SECRET)
            .expect("Gagal generate token");

        let claims = validate_token(&token, TEST_SECRET).expect("Gagal validate token");

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "siti@example.com");
        assert_eq!(claims.role, "Pembeli");
        assert!(!claims.jti.is_empty());
        assert_eq!(claims.exp - claims.iat, TOKEN_EXPIRY_SECONDS);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let token = generate_token(7, "siti@example.com", "Pembeli", TEST_SECRET)
            .expect("Gagal generate token");

        let result = validate_token(&token, "secret-yang-salah");
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_validate_garbage_token() {
        let result = validate_token("bukan.token.jwt", TEST_SECRET);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_tokens_have_unique_jti() {
        let token1 = generate_token(1, "a@example.com", "Admin", TEST_SECRET).unwrap();
        let token2 = generate_token(1, "a@example.com", "Admin", TEST_SECRET).unwrap();

        let claims1 = validate_token(&token1, TEST_SECRET).unwrap();
        let claims2 = validate_token(&token2, TEST_SECRET).unwrap();
        assert_ne!(claims1.jti, claims2.jti);
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123token"),
            Some("abc123token".to_string())
        );
        assert_eq!(extract_bearer_token("Token abc123"), None);
        assert_eq!(extract_bearer_token(""), None);
    }
}
