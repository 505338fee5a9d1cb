use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

/// Shared state handed to every handler
///
/// Built once at startup. The pool is the single storage handle; modules
/// receive it explicitly through this state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub jwt_secret: JwtSecret,
}

impl AppState {
    pub fn new(pool: PgPool, jwt_secret: &str) -> Self {
        Self {
            pool,
            jwt_secret: JwtSecret(Arc::from(jwt_secret)),
        }
    }
}

/// HMAC secret used to sign and verify access tokens
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}
