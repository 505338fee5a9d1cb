use axum::http::Method;

use super::FeatureModule;
use crate::api::handlers::products;
use crate::api::routing::{ComposeError, RouteTable};
use crate::api::state::AppState;
use crate::infrastructure::schema::SchemaDescriptor;

pub const CATEGORY: SchemaDescriptor = SchemaDescriptor::new(
    "categories",
    &[r#"
    CREATE TABLE IF NOT EXISTS categories (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    )
    "#],
);

pub const PRODUCT: SchemaDescriptor = SchemaDescriptor::new(
    "products",
    &[
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            price NUMERIC(12, 2) NOT NULL CHECK (price >= 0),
            image_url TEXT NOT NULL DEFAULT '',
            in_stock BOOLEAN NOT NULL DEFAULT TRUE,
            category_id BIGINT NOT NULL REFERENCES categories (id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        "CREATE INDEX IF NOT EXISTS idx_products_category_id ON products (category_id)",
    ],
)
.referencing(&["categories"]);

/// Catalogue: categories and products
pub struct ProductsModule;

impl FeatureModule<AppState> for ProductsModule {
    fn name(&self) -> &'static str {
        "products"
    }

    fn schema(&self) -> Vec<SchemaDescriptor> {
        vec![CATEGORY, PRODUCT]
    }

    fn register_routes(&self, routes: &mut RouteTable<AppState>) -> Result<(), ComposeError> {
        routes
            .route(Method::GET, "/products", products::list_products)?
            .route(Method::POST, "/products", products::create_product)?
            .route(Method::GET, "/products/:id", products::get_product)?
            .route(Method::GET, "/categories", products::list_categories)?
            .route(Method::POST, "/categories", products::create_category)?;
        Ok(())
    }
}
