use axum::http::Method;

use super::FeatureModule;
use crate::api::handlers::orders;
use crate::api::routing::{ComposeError, RouteTable};
use crate::api::state::AppState;
use crate::infrastructure::schema::SchemaDescriptor;

pub const ORDER: SchemaDescriptor = SchemaDescriptor::new(
    "orders",
    &[
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            total NUMERIC(12, 2) NOT NULL CHECK (total >= 0),
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders (user_id)",
    ],
)
.referencing(&["users"]);

pub const ORDER_ITEM: SchemaDescriptor = SchemaDescriptor::new(
    "order_items",
    &[
        r#"
        CREATE TABLE IF NOT EXISTS order_items (
            id BIGSERIAL PRIMARY KEY,
            order_id BIGINT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
            product_id BIGINT NOT NULL REFERENCES products (id),
            quantity INTEGER NOT NULL CHECK (quantity > 0),
            price NUMERIC(12, 2) NOT NULL
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items (order_id)",
    ],
)
.referencing(&["orders", "products"]);

/// Checkout and order history
pub struct OrdersModule;

impl FeatureModule<AppState> for OrdersModule {
    fn name(&self) -> &'static str {
        "orders"
    }

    fn schema(&self) -> Vec<SchemaDescriptor> {
        vec![ORDER, ORDER_ITEM]
    }

    fn register_routes(&self, routes: &mut RouteTable<AppState>) -> Result<(), ComposeError> {
        routes
            .route(Method::POST, "/orders", orders::create_order)?
            .route(Method::GET, "/orders", orders::list_orders)?;
        Ok(())
    }
}
