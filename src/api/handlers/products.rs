use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::domain::product::{Category, CategoryName, NewProduct, Product};
use crate::domain::repositories::ProductRepository;
use crate::infrastructure::repositories::PostgresProductRepository;

/// Catalogue entry as served to the storefront
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Price")]
    pub price: Decimal,
    #[serde(rename = "ImageURL")]
    pub image_url: String,
    #[serde(rename = "CategoryID")]
    pub category_id: i64,
    #[serde(rename = "InStock")]
    pub in_stock: bool,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            image_url: product.image_url,
            category_id: product.category_id,
            in_stock: product.in_stock,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

/// Query string for product listing
#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category: Option<i64>,
}

/// Request body for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Price")]
    pub price: Decimal,
    #[serde(rename = "ImageURL", default)]
    pub image_url: String,
    #[serde(rename = "CategoryID")]
    pub category_id: i64,
    #[serde(rename = "InStock", default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// Request body for creating a category
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(rename = "Name")]
    pub name: String,
}

/// List products, optionally filtered by category
///
/// GET /products?category=:id
pub async fn list_products(
    State(pool): State<PgPool>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let product_repo = PostgresProductRepository::new(pool);
    let products = product_repo.list_products(filter.category).await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// Get a product by ID
///
/// GET /products/:id
pub async fn get_product(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product_repo = PostgresProductRepository::new(pool);
    let product = product_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", id)))?;

    Ok(Json(ProductResponse::from(product)))
}

/// Create a product
///
/// POST /products
pub async fn create_product(
    State(pool): State<PgPool>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = NewProduct::new(
        req.name,
        req.description,
        req.price,
        req.image_url,
        req.category_id,
        req.in_stock,
    )
    .map_err(ApiError::bad_request)?;

    let product_repo = PostgresProductRepository::new(pool);
    let product = product_repo.create_product(&product).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// List categories
///
/// GET /categories
pub async fn list_categories(
    State(pool): State<PgPool>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let product_repo = PostgresProductRepository::new(pool);
    let categories = product_repo.list_categories().await?;

    Ok(Json(
        categories.into_iter().map(CategoryResponse::from).collect(),
    ))
}

/// Create a category
///
/// POST /categories
pub async fn create_category(
    State(pool): State<PgPool>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let name = CategoryName::new(req.name).map_err(ApiError::bad_request)?;

    let product_repo = PostgresProductRepository::new(pool);
    let category = product_repo.create_category(&name).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}
