use axum::http::Method;

use super::FeatureModule;
use crate::api::handlers::users;
use crate::api::routing::{ComposeError, RouteTable};
use crate::api::state::AppState;
use crate::infrastructure::schema::SchemaDescriptor;

pub const USER: SchemaDescriptor = SchemaDescriptor::new(
    "users",
    &[r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'customer',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#],
);

/// Accounts: registration, login and the current-user lookup
pub struct UsersModule;

impl FeatureModule<AppState> for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    fn schema(&self) -> Vec<SchemaDescriptor> {
        vec![USER]
    }

    fn register_routes(&self, routes: &mut RouteTable<AppState>) -> Result<(), ComposeError> {
        routes
            .route(Method::POST, "/register", users::register)?
            .route(Method::POST, "/login", users::login)?
            .route(Method::GET, "/me", users::me)?;
        Ok(())
    }
}
