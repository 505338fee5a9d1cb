use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::product::{Category, CategoryName, NewProduct, Product};
use crate::domain::repositories::{ProductRepository, RepositoryError};

/// PostgreSQL implementation of ProductRepository
///
/// Serves the catalogue tables created by the products module.
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a new PostgresProductRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: Decimal,
    image_url: String,
    category_id: i64,
    in_stock: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            category_id: row.category_id,
            in_stock: row.in_stock,
        }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn create_category(&self, name: &CategoryName) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_write(e, "Category already exists", "Invalid category")
        })?;

        Ok(row.into())
    }

    async fn list_products(
        &self,
        category_id: Option<i64>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, image_url, category_id, in_stock
            FROM products
            WHERE $1::BIGINT IS NULL OR category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, image_url, category_id, in_stock
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price, image_url, category_id, in_stock
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, description, price, image_url, category_id, in_stock)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, price, image_url, category_id, in_stock
            "#,
        )
        .bind(product.name())
        .bind(product.description())
        .bind(product.price())
        .bind(product.image_url())
        .bind(product.category_id())
        .bind(product.in_stock())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            RepositoryError::from_write(
                e,
                "Product already exists",
                &format!("Category not found: {}", product.category_id()),
            )
        })?;

        Ok(row.into())
    }
}
