use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::api::errors::ApiError;
use crate::api::state::JwtSecret;
use crate::auth::jwt::verify_token;

/// Authenticated caller, extracted from a bearer token
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser { id, .. }: CurrentUser,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello user {}", id))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub role: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>")
            })?;

        let secret = JwtSecret::from_ref(state);
        let claims = verify_token(token, secret.as_str())
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(CurrentUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}
