use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryError;
use crate::domain::user::value_objects::Email;

/// Role assigned to every self-registered account
pub const DEFAULT_ROLE: &str = "customer";

/// Stored user account
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: Email,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// User data for insertion; the database assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
    pub role: String,
}

/// Repository trait for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    ///
    /// Fails with `RepositoryError::Conflict` if the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;
}
