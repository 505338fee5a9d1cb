use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::order::{NewOrder, Order};

/// Repository trait for placed orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and its lines atomically
    async fn create(&self, order: &NewOrder) -> Result<Order, RepositoryError>;

    /// All orders placed by a user, newest first
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Order>, RepositoryError>;
}
