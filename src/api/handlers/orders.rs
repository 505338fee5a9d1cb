use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::CurrentUser;
use crate::domain::order::{NewOrder, Order, OrderItem, RequestedLine};
use crate::domain::repositories::{OrderRepository, ProductRepository};
use crate::infrastructure::repositories::{PostgresOrderRepository, PostgresProductRepository};

/// One requested line; any client-side price is ignored
#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    #[serde(rename = "Quantity")]
    pub quantity: i32,
}

/// Request body for checkout
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "ProductID")]
    pub product_id: i64,
    #[serde(rename = "Quantity")]
    pub quantity: i32,
    #[serde(rename = "Price")]
    pub price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "UserID")]
    pub user_id: i64,
    #[serde(rename = "Total")]
    pub total: Decimal,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "OrderItems")]
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            total: order.total,
            status: order.status,
            created_at: order.created_at,
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

/// Place an order for the authenticated user
///
/// POST /orders
pub async fn create_order(
    State(pool): State<PgPool>,
    current: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let requested: Vec<RequestedLine> = req
        .items
        .iter()
        .map(|line| RequestedLine {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect();

    if requested.is_empty() {
        return Err(ApiError::bad_request("Order must contain at least one item"));
    }

    let product_ids: Vec<i64> = requested.iter().map(|line| line.product_id).collect();
    let catalogue = PostgresProductRepository::new(pool.clone())
        .find_by_ids(&product_ids)
        .await?;

    let order = NewOrder::price(current.id, &requested, &catalogue).map_err(ApiError::bad_request)?;

    let order_repo = PostgresOrderRepository::new(pool);
    let order = order_repo.create(&order).await?;

    tracing::info!(order_id = order.id, user_id = current.id, "Order placed");
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// Orders of the authenticated user, newest first
///
/// GET /orders
pub async fn list_orders(
    State(pool): State<PgPool>,
    current: CurrentUser,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let order_repo = PostgresOrderRepository::new(pool);
    let orders = order_repo.find_by_user(current.id).await?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
