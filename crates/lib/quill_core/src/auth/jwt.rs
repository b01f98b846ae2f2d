//! JWT token generation and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::AuthError;
use crate::models::auth::TokenClaims;

/// Token lifetime: 90000 seconds (25 hours).
pub const TOKEN_EXPIRY_SECS: i64 = 90_000;

/// Generate a signed JWT (HS256) embedding the user id, valid for 90000 seconds.
pub fn generate_token(user_id: i32, secret: &[u8]) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = TokenClaims {
        user_id,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(TOKEN_EXPIRY_SECS)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
}

/// Verify signature and expiry, returning the claims on success.
pub fn check_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // No grace period past `exp`.
    validation.leeway = 0;
    decode::<TokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            let msg = match e.kind() {
                ErrorKind::ExpiredSignature => "jwt expired",
                ErrorKind::InvalidSignature => "invalid signature",
                _ => "jwt malformed",
            };
            AuthError::TokenError(msg.to_string())
        })
}
