//! Tests for auth module
//!
//! These tests verify:
//! - token decoding with and without the Bearer prefix
//! - scope parsing and enforcement
//! - mapping of token errors to API errors

#[cfg(test)]
mod tests {
    use super::super::claims::Claims;
    use super::super::extractors::{decode_client, TokenError};
    use super::super::*;
    use crate::common::ApiError;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    const SECRET: &str = "test_secret_key";

    fn token_with_scope(scope: &str, secret: &str) -> String {
        let claims = Claims {
            sub: "student-admin".to_string(),
            exp: 9999999999,
            scope: scope.to_string(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    #[test]
    fn test_decode_client_reads_scopes() {
        let token = token_with_scope("READ_SERVICES_CARD WRITE_SERVICES_CARD", SECRET);

        let client = decode_client(&token, SECRET).expect("token should decode");

        assert_eq!(client.id, "student-admin");
        assert!(client.require_scope(READ_SERVICES_CARD).is_ok());
        assert!(client.require_scope(WRITE_SERVICES_CARD).is_ok());
    }

    #[test]
    fn test_decode_client_accepts_bearer_prefix() {
        let token = format!("Bearer {}", token_with_scope(READ_SERVICES_CARD, SECRET));
        assert!(decode_client(&token, SECRET).is_ok());
    }

    #[test]
    fn test_decode_client_fails_with_wrong_secret() {
        let token = token_with_scope(READ_SERVICES_CARD, SECRET);

        let result = decode_client(&token, "wrong_secret_key");

        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_missing_scope_is_forbidden() {
        let token = token_with_scope(READ_SERVICES_CARD, SECRET);
        let client = decode_client(&token, SECRET).unwrap();

        let result = client.require_scope(DELETE_SERVICES_CARD);

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        assert!(matches!(
            ApiError::from(TokenError::Missing),
            ApiError::Unauthorized(_)
        ));
    }
}
