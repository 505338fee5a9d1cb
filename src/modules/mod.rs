//! Feature modules
//!
//! Each module contributes the schema descriptors for the entities it owns
//! and registers its routes into the shared [`RouteTable`]. Modules never
//! call into one another; they share only entity identifiers (an order line
//! stores a product id).

pub mod orders;
pub mod products;
pub mod system;
pub mod users;

use crate::api::routing::{ComposeError, RouteTable};
use crate::api::state::AppState;
use crate::infrastructure::schema::SchemaDescriptor;

pub use orders::OrdersModule;
pub use products::ProductsModule;
pub use system::SystemModule;
pub use users::UsersModule;

/// Contract between the bootstrap and one feature module
pub trait FeatureModule<S>: Send + Sync {
    /// Name used when reporting route collisions
    fn name(&self) -> &'static str;

    /// Descriptors for the entities this module persists, dependencies first
    fn schema(&self) -> Vec<SchemaDescriptor> {
        Vec::new()
    }

    /// Adds this module's handlers to the dispatch table
    ///
    /// Must not depend on any other module having registered first.
    fn register_routes(&self, routes: &mut RouteTable<S>) -> Result<(), ComposeError>;
}

/// The service's modules
///
/// The list order is the migration order: the catalogue first, then users,
/// then orders, which reference both.
pub fn all() -> Vec<&'static dyn FeatureModule<AppState>> {
    let modules: [&'static dyn FeatureModule<AppState>; 4] =
        [&ProductsModule, &UsersModule, &OrdersModule, &SystemModule];
    modules.to_vec()
}

/// Ordered union of every module's descriptors
pub fn schema_of(modules: &[&dyn FeatureModule<AppState>]) -> Vec<SchemaDescriptor> {
    modules.iter().flat_map(|module| module.schema()).collect()
}
