use axum::http::Method;

use super::FeatureModule;
use crate::api::handlers::system;
use crate::api::routing::{ComposeError, RouteTable};
use crate::api::state::AppState;

/// Operational endpoints; owns no entities
pub struct SystemModule;

impl FeatureModule<AppState> for SystemModule {
    fn name(&self) -> &'static str {
        "system"
    }

    fn register_routes(&self, routes: &mut RouteTable<AppState>) -> Result<(), ComposeError> {
        routes.route(Method::GET, "/health", system::health_check)?;
        Ok(())
    }
}
