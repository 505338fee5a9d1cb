// JWT token creation and verification
// HS256 tokens identifying a customer, valid for 24 hours

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token lifetime in hours
pub const TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user id)
/// * `role` - Role of the user at login time
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject)
    pub sub: i64,
    pub role: String,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Creates a JWT token for a user
///
/// # Arguments
/// * `user_id` - The user's ID to include in the token
/// * `role` - The user's role
/// * `secret` - The secret key for signing
///
/// # Example
/// ```
/// use storefront_api::auth::jwt::create_token;
///
/// let token = create_token(42, "customer", "your-secret-key").expect("valid token");
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn create_token(user_id: i64, role: &str, secret: &str) -> Result<String, String> {
    let expiry = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: expiry.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies and decodes a JWT token
///
/// # Returns
/// * `Ok(Claims)` - The decoded claims if token is valid
/// * `Err(String)` - If token is invalid or expired
///
/// # Example
/// ```
/// use storefront_api::auth::jwt::{create_token, verify_token};
///
/// let secret = "your-secret-key";
/// let token = create_token(42, "customer", secret).unwrap();
///
/// let claims = verify_token(&token, secret).expect("valid token");
/// assert_eq!(claims.sub, 42);
/// ```
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    #[test]
    fn create_and_verify_token() {
        let token = create_token(7, "customer", TEST_SECRET).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, "customer");
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token(7, "customer", TEST_SECRET).expect("valid token");

        let result = verify_token(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_token_fails() {
        let result = verify_token("invalid.token.string", TEST_SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn expired_token_fails() {
        let claims = Claims {
            sub: 7,
            role: "customer".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_ref()),
        )
        .unwrap();

        assert!(verify_token(&token, TEST_SECRET).is_err());
    }

    #[test]
    fn token_expiry_set() {
        let token = create_token(7, "customer", TEST_SECRET).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        let expiry_time = claims.exp as i64;
        let now = Utc::now().timestamp();
        let in_24_hours = (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp();

        assert!(expiry_time > now);
        assert!(expiry_time <= in_24_hours + 10);
    }
}
