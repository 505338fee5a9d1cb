use thiserror::Error;

/// Errors returned by repository implementations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Input referenced data that does not exist or violated a constraint
    #[error("{0}")]
    Invalid(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Maps constraint violations to domain errors, everything else to `Database`
    pub fn from_write(error: sqlx::Error, conflict: &str, invalid: &str) -> Self {
        if let sqlx::Error::Database(db) = &error {
            if db.is_unique_violation() {
                return Self::Conflict(conflict.to_string());
            }
            if db.is_foreign_key_violation() {
                return Self::Invalid(invalid.to_string());
            }
        }
        Self::Database(error)
    }
}
