use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::product::{Category, CategoryName, NewProduct, Product};

/// Repository trait for the product catalogue
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All categories, ordered by name
    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;

    /// Create a category
    ///
    /// Fails with `RepositoryError::Conflict` if the name is taken.
    async fn create_category(&self, name: &CategoryName) -> Result<Category, RepositoryError>;

    /// All products, optionally restricted to one category
    async fn list_products(&self, category_id: Option<i64>)
        -> Result<Vec<Product>, RepositoryError>;

    /// Find a product by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError>;

    /// Find every product whose ID is in `ids`; unknown IDs are skipped
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Product>, RepositoryError>;

    /// Create a product
    ///
    /// Fails with `RepositoryError::Invalid` if the category does not exist.
    async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError>;
}
