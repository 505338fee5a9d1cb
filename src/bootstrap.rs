// Startup sequence
// storage -> schema -> routes -> CORS -> listener; any failure aborts before serving

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};
use sqlx::PgPool;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::api::middleware::cors::{cors, CorsPolicy, InvalidOrigin};
use crate::api::routing::{compose, ComposeError};
use crate::api::state::AppState;
use crate::config::{Config, ConfigError};
use crate::infrastructure::database::{self, StorageError};
use crate::infrastructure::migrator::{migrate, MigrationError};
use crate::modules::{self, FeatureModule};
use crate::server::{self, ServerError};

/// Errors that abort startup; none are retried
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("configuration error: {0}")]
    Cors(#[from] InvalidOrigin),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("schema migration failed: {0}")]
    Migration(#[from] MigrationError),

    #[error("route composition failed: {0}")]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Runs the service until shutdown
pub async fn run(config: Config) -> Result<(), BootstrapError> {
    let cors = CorsPolicy::new(&config.cors_allowed_origin)?;
    let pool = database::connect(&config.database).await?;

    launch(pool, &config, cors).await
}

/// Everything after the storage handle exists
///
/// The schema is fully migrated and the handler fully composed before the
/// listener is bound.
pub async fn launch(pool: PgPool, config: &Config, cors: CorsPolicy) -> Result<(), BootstrapError> {
    let modules = modules::all();

    migrate(&pool, &modules::schema_of(&modules)).await?;

    let state = AppState::new(pool, &config.jwt_secret);
    let app = build_app(&modules, state, cors)?;

    let listener = server::bind(config.listen_addr).await?;
    server::serve(listener, app).await?;

    Ok(())
}

/// Composes module routes and wraps them in the shared middleware stack
///
/// CORS is the outermost layer, so every response leaving the service,
/// including errors and the 404 fallback, carries its headers.
pub fn build_app<S>(
    modules: &[&dyn FeatureModule<S>],
    state: S,
    cors_policy: CorsPolicy,
) -> Result<Router, ComposeError>
where
    S: Clone + Send + Sync + 'static,
{
    let router = compose(modules, state)?;

    Ok(router
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(Arc::new(cors_policy), cors)))
}
